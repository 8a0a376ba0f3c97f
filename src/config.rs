use serde::Deserialize;
use std::env;

use crate::error::ConfigError;

/// 一个待签到的账号。
///
/// `site` 保持为普通字符串：配置里出现未注册的站点时，
/// 只在执行阶段让该账号单独失败，而不是整份配置解析报错。
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub name: String,
    pub site: String,
    pub cookie: String,
}

/// 站点专属变量里的记录，site 由变量名确定。
#[derive(Debug, Deserialize)]
struct SiteAccount {
    name: String,
    cookie: String,
}

fn parse_shared(var: &str, raw: &str) -> Result<Vec<Account>, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::Invalid {
        var: var.to_string(),
        source,
    })
}

fn parse_for_site(var: &str, raw: &str, site: &str) -> Result<Vec<Account>, ConfigError> {
    let entries: Vec<SiteAccount> =
        serde_json::from_str(raw).map_err(|source| ConfigError::Invalid {
            var: var.to_string(),
            source,
        })?;
    Ok(entries
        .into_iter()
        .map(|e| Account {
            name: e.name,
            site: site.to_string(),
            cookie: e.cookie,
        })
        .collect())
}

/// 从环境变量读取全部账号。
///
/// `ACCOUNTS` 为共享变量（每条记录自带 site），`HIFITI_ACCOUNTS`、
/// `BINMT_ACCOUNTS` 为站点专属变量，按此顺序拼接。三者都未设置视为
/// 配置缺失。
pub fn load_accounts() -> Result<Vec<Account>, ConfigError> {
    let mut accounts = Vec::new();
    let mut configured = false;

    if let Ok(raw) = env::var("ACCOUNTS") {
        configured = true;
        accounts.extend(parse_shared("ACCOUNTS", &raw)?);
    }
    for (var, site) in [("HIFITI_ACCOUNTS", "hifiti"), ("BINMT_ACCOUNTS", "binmt")] {
        if let Ok(raw) = env::var(var) {
            configured = true;
            accounts.extend(parse_for_site(var, &raw, site)?);
        }
    }

    if !configured {
        return Err(ConfigError::Missing);
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_variable_keeps_declared_order() {
        let accounts = parse_shared(
            "ACCOUNTS",
            r#"[{"name":"甲","site":"hifiti","cookie":"a=1"},
                {"name":"乙","site":"binmt","cookie":"b=2"}]"#,
        )
        .unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name, "甲");
        assert_eq!(accounts[0].site, "hifiti");
        assert_eq!(accounts[1].name, "乙");
        assert_eq!(accounts[1].cookie, "b=2");
    }

    #[test]
    fn site_variable_fills_in_site() {
        let accounts =
            parse_for_site("BINMT_ACCOUNTS", r#"[{"name":"甲","cookie":"a=1"}]"#, "binmt")
                .unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].site, "binmt");
    }

    #[test]
    fn malformed_json_names_the_variable() {
        let err = parse_shared("ACCOUNTS", "这不是 JSON").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "ACCOUNTS"));
    }

    #[test]
    fn missing_record_field_is_invalid() {
        let err = parse_for_site("HIFITI_ACCOUNTS", r#"[{"name":"甲"}]"#, "hifiti").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    // 环境变量是进程级状态，缺失与存在两种情况放在同一个测试里
    // 顺序覆盖，避免并发测试互相污染。
    #[test]
    fn env_loading_requires_at_least_one_source() {
        assert!(matches!(load_accounts(), Err(ConfigError::Missing)));

        env::set_var("ACCOUNTS", r#"[{"name":"乙","site":"binmt","cookie":"b=2"}]"#);
        env::set_var("HIFITI_ACCOUNTS", r#"[{"name":"甲","cookie":"a=1"}]"#);
        let accounts = load_accounts().unwrap();
        env::remove_var("ACCOUNTS");
        env::remove_var("HIFITI_ACCOUNTS");

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name, "乙");
        assert_eq!(accounts[1].site, "hifiti");
    }
}
