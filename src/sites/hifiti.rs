use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, USER_AGENT};
use reqwest::Method;
use serde::Deserialize;

use super::{cookie_value, Outcome, RequestSpec, SiteAdapter, BROWSER_UA};
use crate::error::CheckinError;

const DEFAULT_BASE_URL: &str = "https://www.hifiti.com";
const ALREADY_SIGNED: &str = "今天已经签过啦！";

/// HiFiTi 音乐论坛。签到接口是一个 XHR POST，返回 JSON。
pub struct HifitiAdapter {
    base_url: String,
}

impl HifitiAdapter {
    /// 测试用：把请求指向本地 mock 服务。
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for HifitiAdapter {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    code: String,
    message: String,
}

impl SiteAdapter for HifitiAdapter {
    fn id(&self) -> &str {
        "hifiti"
    }

    fn display_name(&self) -> &str {
        "HiFiTi"
    }

    fn sign_request(&self, cookie: &str) -> Result<RequestSpec, CheckinError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(COOKIE, cookie_value(cookie)?);

        Ok(RequestSpec {
            method: Method::POST,
            url: format!("{}/sg_sign.htm", self.base_url),
            headers,
        })
    }

    fn interpret(&self, body: &str) -> Result<Outcome, CheckinError> {
        let resp: SignResponse = serde_json::from_str(body).map_err(|e| {
            CheckinError::Parse(format!("响应不是预期的 JSON（{e}），Cookie 可能已失效"))
        })?;

        // code 非 0 但提示今天已签过，按成功处理，重复运行不算出错
        if resp.code == "0" || resp.message == ALREADY_SIGNED {
            Ok(Outcome::Success(resp.message))
        } else {
            Ok(Outcome::Failure(resp.message))
        }
    }
}
