use thiserror::Error;

/// 启动阶段的配置错误，终止整个运行，不发起任何网络请求。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("未配置账号：请设置 ACCOUNTS、HIFITI_ACCOUNTS 或 BINMT_ACCOUNTS")]
    Missing,

    #[error("{var} 格式错误：{source}")]
    Invalid {
        var: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 单个账号签到过程中的错误，只影响该账号，不波及其他账号。
#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("未知站点：{0}")]
    UnknownSite(String),

    #[error("Cookie 无法写入请求头：{0}")]
    InvalidCookie(String),

    #[error("网络错误：{0}")]
    Network(#[from] reqwest::Error),

    #[error("网络错误：HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Sign(String),

    #[error("签到任务异常退出：{0}")]
    Join(#[from] tokio::task::JoinError),
}
