use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;

use crate::error::CheckinError;

mod binmt;
mod hifiti;

pub use binmt::BinmtAdapter;
pub use hifiti::HifitiAdapter;

/// 桌面浏览器 UA，避免被简单的反爬规则拦截。
pub(crate) const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// 一次完整描述好的出站请求。
#[derive(Debug)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

/// 单次签到的归一化结果，消息为站点自己返回的文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

/// 站点策略：如何构造请求、如何解读响应。
///
/// 三个方法都是同步的——这里只产出请求的描述和对响应体的解读，
/// 真正的网络往返在 executor 里。
pub trait SiteAdapter: Send + Sync {
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// 正式签到前的预热请求，默认没有。
    fn warmup_request(&self, _cookie: &str) -> Result<Option<RequestSpec>, CheckinError> {
        Ok(None)
    }

    fn sign_request(&self, cookie: &str) -> Result<RequestSpec, CheckinError>;

    /// 把站点返回的原始响应体解读成统一结果。
    /// 对任意输入都不得 panic；无法解读时返回 `CheckinError::Parse`。
    fn interpret(&self, body: &str) -> Result<Outcome, CheckinError>;
}

pub(crate) fn cookie_value(cookie: &str) -> Result<HeaderValue, CheckinError> {
    HeaderValue::from_str(cookie).map_err(|e| CheckinError::InvalidCookie(e.to_string()))
}

/// 站点标识到适配器的查找表。
pub struct SiteRegistry {
    sites: HashMap<String, Arc<dyn SiteAdapter>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
        }
    }

    pub fn register(&mut self, adapter: Arc<dyn SiteAdapter>) {
        self.sites.insert(adapter.id().to_string(), adapter);
    }

    pub fn get(&self, site: &str) -> Option<Arc<dyn SiteAdapter>> {
        self.sites.get(site).cloned()
    }

    /// 注册全部内置站点。
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(Arc::new(HifitiAdapter::default()));
        reg.register(Arc::new(BinmtAdapter::default()));
        reg
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
