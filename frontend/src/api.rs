//! 记录集合后端（BaaS）客户端
//!
//! 封装外部记录存储的 REST 接口：认证、注册、按集合的
//! 列表/创建/删除。错误按语义分类（认证/校验/未找到/查询），
//! 上层决定用户可见的文案。

use crate::web::HttpClient;
use crate::web::http::{HttpError, HttpResponse};
use sanamente_shared::User;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 后端地址，构建时可通过环境变量覆盖
pub const BACKEND_URL: &str = match option_env!("SANAMENTE_BACKEND_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8090",
};

// =========================================================
// 错误类型
// =========================================================

/// 按语义分类的接口错误
///
/// 所有变体都同步返回给发起操作的界面动作，不会吞掉；
/// 任何单次失败都不致命，应用保持可用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 凭据错误、token 过期（401/403）
    Auth(String),
    /// 记录校验失败，如自定义参数重名（400）
    Validation(String),
    /// 资源不存在（404）
    NotFound(String),
    /// 网络失败或其他查询错误
    Query(String),
}

impl ApiError {
    fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ApiError::Validation(message),
            401 | 403 => ApiError::Auth(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Query(message),
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Auth(msg) => write!(f, "auth error: {}", msg),
            ApiError::Validation(msg) => write!(f, "validation error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "not found: {}", msg),
            ApiError::Query(msg) => write!(f, "query error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Query(e.to_string())
    }
}

/// 后端错误响应体（只取 message）
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// =========================================================
// 传输类型
// =========================================================

/// 认证成功的响应
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSuccess {
    pub token: String,
    pub record: User,
}

/// 注册请求体
#[derive(Debug, Serialize)]
struct CreateAccountRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "passwordConfirm")]
    password_confirm: &'a str,
}

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    identity: &'a str,
    password: &'a str,
}

/// 列表响应（单页拉满，见 `full_list`）
#[derive(Debug, Deserialize)]
struct ListResult<T> {
    items: Vec<T>,
}

// =========================================================
// 客户端
// =========================================================

/// 记录集合客户端
#[derive(Clone, Debug, PartialEq)]
pub struct RecordApi {
    base_url: String,
    token: Option<String>,
}

impl RecordApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    /// 携带认证 token 的客户端副本
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn records_url(&self, collection: &str) -> String {
        self.url(&format!("/api/collections/{}/records", collection))
    }

    fn authorize(&self, builder: crate::web::http::HttpRequestBuilder) -> crate::web::http::HttpRequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", token),
            None => builder,
        }
    }

    /// 非 2xx 响应转为分类错误
    async fn fail(response: HttpResponse) -> ApiError {
        let status = response.status();
        let message = match response.text().await {
            Ok(body) => {
                let parsed: ErrorBody = serde_json_wasm::from_str(&body).unwrap_or_default();
                if parsed.message.is_empty() {
                    format!("status {}", status)
                } else {
                    parsed.message
                }
            }
            Err(_) => format!("status {}", status),
        };
        ApiError::from_status(status, message)
    }

    // ---------------- 认证接口 ----------------

    /// 用邮箱+密码换取 token 和用户记录
    pub async fn auth_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSuccess, ApiError> {
        let url = self.url("/api/collections/users/auth-with-password");
        let response = HttpClient::post(&url)
            .json(&AuthRequest {
                identity: email,
                password,
            })?
            .send()
            .await?;

        if !response.ok() {
            // 凭据错误后端返回 400，这里语义上是认证失败
            let err = Self::fail(response).await;
            return Err(match err {
                ApiError::Validation(msg) => ApiError::Auth(msg),
                other => other,
            });
        }
        Ok(response.json().await?)
    }

    /// 创建新账号（不登录）
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, ApiError> {
        let url = self.records_url(sanamente_shared::COLLECTION_USERS);
        let response = HttpClient::post(&url)
            .json(&CreateAccountRequest {
                email,
                password,
                password_confirm,
            })?
            .send()
            .await?;

        if !response.ok() {
            return Err(Self::fail(response).await);
        }
        Ok(response.json().await?)
    }

    // ---------------- 记录接口 ----------------

    /// 拉取整个过滤结果列表
    ///
    /// 单页拉满（perPage=500）。这个应用是个人日记，
    /// 单用户记录量远小于单页上限。
    pub async fn full_list<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &str,
        sort: &str,
    ) -> Result<Vec<T>, ApiError> {
        let query = format!(
            "?page=1&perPage=500&filter={}&sort={}",
            js_sys::encode_uri_component(filter),
            js_sys::encode_uri_component(sort),
        );
        let url = format!("{}{}", self.records_url(collection), query);
        let response = self.authorize(HttpClient::get(&url)).send().await?;

        if !response.ok() {
            return Err(Self::fail(response).await);
        }
        let list: ListResult<T> = response.json().await?;
        Ok(list.items)
    }

    /// 创建记录
    pub async fn create_record<B: Serialize, R: DeserializeOwned>(
        &self,
        collection: &str,
        fields: &B,
    ) -> Result<R, ApiError> {
        let url = self.records_url(collection);
        let response = self
            .authorize(HttpClient::post(&url).json(fields)?)
            .send()
            .await?;

        if !response.ok() {
            return Err(Self::fail(response).await);
        }
        Ok(response.json().await?)
    }

    /// 删除记录
    pub async fn delete_record(&self, collection: &str, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.records_url(collection), id);
        let response = self.authorize(HttpClient::delete(&url)).send().await?;

        if !response.ok() {
            return Err(Self::fail(response).await);
        }
        Ok(())
    }
}

/// 按所有者过滤的表达式
pub fn owner_filter(user_id: &str) -> String {
    format!("user = '{}'", user_id)
}
