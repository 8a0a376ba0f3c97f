use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use reqwest::Method;
use scraper::{Html, Selector};
use serde::Deserialize;

use super::{cookie_value, Outcome, RequestSpec, SiteAdapter, BROWSER_UA};
use crate::error::CheckinError;

const DEFAULT_BASE_URL: &str = "https://www.binmt.cc";
const WARMUP_PATH: &str = "/k_misign-sign.html";
const SIGN_PATH: &str = "/plugin.php?id=k_misign:sign&operation=qiandao&format=json";
// Discuz 提示页的消息容器
const MESSAGE_SELECTOR: &str = "#messagetext p";

/// BinMT（MT 管理器论坛）。签到走 k_misign 插件接口，正式请求前
/// 需要先 GET 一次签到页让服务端准备好会话状态。
pub struct BinmtAdapter {
    base_url: String,
}

impl BinmtAdapter {
    /// 测试用：把请求指向本地 mock 服务。
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn base_headers(&self, cookie: &str) -> Result<HeaderMap, CheckinError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(COOKIE, cookie_value(cookie)?);
        Ok(headers)
    }

    /// 接口异常时站点会吐回整页 HTML，从提示框里把结果文本抠出来。
    fn interpret_html(&self, body: &str) -> Result<Outcome, CheckinError> {
        let document = Html::parse_document(body);
        let selector = Selector::parse(MESSAGE_SELECTOR).unwrap();

        let Some(el) = document.select(&selector).next() else {
            return Err(CheckinError::Parse(
                "响应里找不到签到结果，Cookie 可能已失效".to_string(),
            ));
        };

        let text = el.text().collect::<String>().trim().to_string();
        if text.contains("已签到") || text.contains("签到成功") {
            Ok(Outcome::Success(text))
        } else {
            Ok(Outcome::Failure(text))
        }
    }
}

impl Default for BinmtAdapter {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    status: i64,
    #[serde(default)]
    msg: Option<String>,
}

impl SiteAdapter for BinmtAdapter {
    fn id(&self) -> &str {
        "binmt"
    }

    fn display_name(&self) -> &str {
        "BinMT"
    }

    fn warmup_request(&self, cookie: &str) -> Result<Option<RequestSpec>, CheckinError> {
        Ok(Some(RequestSpec {
            method: Method::GET,
            url: format!("{}{}", self.base_url, WARMUP_PATH),
            headers: self.base_headers(cookie)?,
        }))
    }

    fn sign_request(&self, cookie: &str) -> Result<RequestSpec, CheckinError> {
        Ok(RequestSpec {
            method: Method::GET,
            url: format!("{}{}", self.base_url, SIGN_PATH),
            headers: self.base_headers(cookie)?,
        })
    }

    fn interpret(&self, body: &str) -> Result<Outcome, CheckinError> {
        let Ok(resp) = serde_json::from_str::<SignResponse>(body) else {
            return self.interpret_html(body);
        };

        let msg = resp.msg.unwrap_or_default();
        if resp.status == 0 || msg.contains("已签到") {
            Ok(Outcome::Success(msg))
        } else if msg.is_empty() {
            Ok(Outcome::Failure("签到失败".to_string()))
        } else {
            Ok(Outcome::Failure(msg))
        }
    }
}
