use std::process;
use std::sync::Arc;

use checkin_bbs::{init_log_env, load_accounts, run_all, SiteRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_log_env();

    let accounts = load_accounts()?;
    let registry = Arc::new(SiteRegistry::with_builtins());
    let results = run_all(registry, accounts).await;

    println!("\n======== 签到结果 ========\n");
    let mut has_error = false;
    for (account, result) in &results {
        match result {
            Ok(msg) => println!("【{} | {}】: ✅ {}", account.name, account.site, msg),
            Err(e) => {
                eprintln!("【{} | {}】: ❌ {}", account.name, account.site, e);
                has_error = true;
            }
        }
    }

    if has_error {
        process::exit(1);
    }
    Ok(())
}
