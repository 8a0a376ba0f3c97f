use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::Account;
use crate::error::CheckinError;
use crate::sites::{Outcome, RequestSpec, SiteRegistry};

/// 每个输入账号对应一条结果，顺序与输入一致。
pub type RunResult = Vec<(Account, Result<String, CheckinError>)>;

async fn send(client: &Client, spec: RequestSpec) -> Result<reqwest::Response, reqwest::Error> {
    client
        .request(spec.method, spec.url)
        .headers(spec.headers)
        .send()
        .await
}

/// 执行单个账号的完整签到流程。
pub async fn check_in(
    client: &Client,
    registry: &SiteRegistry,
    account: &Account,
) -> Result<String, CheckinError> {
    let adapter = registry
        .get(&account.site)
        .ok_or_else(|| CheckinError::UnknownSite(account.site.clone()))?;

    info!("【{} | {}】开始签到...", account.name, adapter.display_name());

    // 预热请求只要求发出去：传输层失败会中断该账号，
    // 响应状态本身不做校验
    if let Some(spec) = adapter.warmup_request(&account.cookie)? {
        let res = send(client, spec).await?;
        debug!("【{}】预热响应状态：{}", account.name, res.status());
    }

    let res = send(client, adapter.sign_request(&account.cookie)?).await?;
    let status = res.status();
    if !status.is_success() {
        return Err(CheckinError::Status(status.as_u16()));
    }

    let body = res.text().await?;
    debug!("【{}】收到原始响应：{}", account.name, body);

    match adapter.interpret(&body)? {
        Outcome::Success(msg) => {
            info!("【{}】签到成功：{}", account.name, msg);
            Ok(msg)
        }
        Outcome::Failure(msg) => Err(CheckinError::Sign(msg)),
    }
}

/// 所有账号并发签到，互不影响；结果按输入顺序收集。
pub async fn run_all(registry: Arc<SiteRegistry>, accounts: Vec<Account>) -> RunResult {
    let client = Client::new();

    let mut handles = Vec::with_capacity(accounts.len());
    for account in accounts.iter().cloned() {
        let client = client.clone();
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            check_in(&client, &registry, &account).await
        }));
    }

    let mut results = Vec::with_capacity(accounts.len());
    for (account, handle) in accounts.into_iter().zip(handles) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(CheckinError::Join(e)),
        };
        results.push((account, outcome));
    }
    results
}
