use crate::config::ApiConfig;
use crate::errors::{AppError, AppResult};
use log::{debug, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// 后端约定的成功状态码
pub const SUCCESS_CODE: i32 = 200;

/// 后端统一响应包
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// 共享 HTTP 封装：统一超时、鉴权头与响应包解析
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpClient {
    pub fn new(cfg: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            access_token: cfg.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// 登录成功后替换令牌
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token.filter(|t| !t.is_empty());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        self.request(self.client.get(self.full_url(url))).await
    }

    pub async fn get_with_query<T, Q>(&self, url: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(self.client.get(self.full_url(url)).query(query)).await
    }

    pub async fn post<T, B>(&self, url: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(self.client.post(self.full_url(url)).json(body)).await
    }

    pub async fn put<T, B>(&self, url: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(self.client.put(self.full_url(url)).json(body)).await
    }

    pub async fn del<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        self.request(self.client.delete(self.full_url(url))).await
    }

    fn full_url(&self, url: &str) -> String {
        format!("{}/{}", self.base_url, url.trim_start_matches('/'))
    }

    async fn request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let builder = match &self.access_token {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let bytes = response.bytes().await?;
        debug!("{} -> {}", url, status);

        if status == StatusCode::UNAUTHORIZED {
            warn!("登录状态失效: {}", url);
            return Err(AppError::Unauthorized(envelope_message(&bytes).unwrap_or_else(|| status.to_string())));
        }
        if !status.is_success() {
            let msg = envelope_message(&bytes).unwrap_or_else(|| status.to_string());
            return Err(AppError::ExternalApi(format!("{} {}: {}", status.as_u16(), url, msg)));
        }

        let envelope: ApiResponse<Value> = serde_json::from_slice(&bytes)?;
        if envelope.code != SUCCESS_CODE {
            return Err(AppError::BizError(envelope.message.unwrap_or_else(|| "请求失败".to_string())));
        }
        let data = serde_json::from_value(envelope.data.unwrap_or(Value::Null))?;
        Ok(data)
    }
}

fn envelope_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiResponse<Value>>(bytes).ok().and_then(|r| r.message)
}
