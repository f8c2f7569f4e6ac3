//! 平台 API 客户端
//!
//! 基于 `web::HttpClient` 与共享协议（`ApiRequest`）的类型化客户端。
//! 错误响应体携带 `ErrorResponse`，在此解码回 `VestError`，
//! 保留服务端的状态语义与操作追踪。

use async_trait::async_trait;

use crate::auth::AuthBackend;
use crate::web::HttpClient;
use groupvest_shared::error::{ErrorResponse, VestError, VestResult, RPC_ERROR_HEADER};
use groupvest_shared::protocol::{
    ApiRequest, CreateOfferRequest, FetchOfferRequest, FetchSessionRequest,
    FetchSystemAttributesRequest, HttpMethod, ListOffersRequest, SignInRequest, SignInResponse,
    SignOutRequest, SignUpRequest, ValidateGroupUrlRequest,
};
use groupvest_shared::{
    OfferDetails, OfferSummary, SessionProfile, SystemAttributes, ValidatedGroupUrl,
    HEADER_AUTH_TOKEN,
};

#[derive(Clone, Debug, PartialEq)]
pub struct GroupVestApi {
    pub base_url: String,
}

impl GroupVestApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// 以当前页面的 origin 作为 API 基地址（同源部署）
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(origin)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送一个协议请求
    ///
    /// GET 请求不携带请求体；其余方法以 JSON 序列化请求对象。
    async fn send<R: ApiRequest>(
        &self,
        request: &R,
        token: Option<&str>,
    ) -> VestResult<R::Response> {
        let url = self.url(R::PATH);

        let mut builder = match R::METHOD {
            HttpMethod::Get => HttpClient::get(&url),
            HttpMethod::Post => HttpClient::post(&url),
            HttpMethod::Put => HttpClient::put(&url),
            HttpMethod::Delete => HttpClient::delete(&url),
        };
        if let Some(token) = token {
            builder = builder.header(HEADER_AUTH_TOKEN, token);
        }
        if !matches!(R::METHOD, HttpMethod::Get) {
            let body = serde_json::to_string(request)
                .map_err(|e| VestError::serialization(e.to_string()).in_op("api.encode"))?;
            builder = builder.header("Content-Type", "application/json").body(body);
        }

        let response = builder.send().await.map_err(|e| {
            VestError::external_api(e.to_string()).in_op_with("api.send", R::PATH)
        })?;

        let status = response.status();
        let succeeded = response.ok();
        let is_rpc_error = response.header(RPC_ERROR_HEADER).is_some();
        let text = response.text().await.map_err(|e| {
            VestError::external_api(e.to_string()).in_op_with("api.read_body", R::PATH)
        })?;

        if is_rpc_error || !succeeded {
            // 结构化错误体优先；解不出来再按状态码归类
            if let Ok(err) = serde_json::from_str::<ErrorResponse>(&text) {
                return Err(VestError::from(err).in_op_with("api.call", R::PATH));
            }
            return Err(status_error(status, R::PATH));
        }

        // 空响应体按 null 解码（() 等无内容应答）
        let payload = if text.is_empty() { "null" } else { text.as_str() };
        serde_json::from_str::<R::Response>(payload)
            .map_err(|e| VestError::serialization(e.to_string()).in_op_with("api.decode", R::PATH))
    }

    // =========================================================
    // 守卫的两项外部加载
    // =========================================================

    /// 获取平台全局配置
    pub async fn fetch_system_attributes(&self) -> VestResult<SystemAttributes> {
        self.send(&FetchSystemAttributesRequest, None).await
    }

    /// 校验 URL 中的群组/课程段
    pub async fn validate_group_url(
        &self,
        group_user_name: &str,
        course_user_name: Option<&str>,
    ) -> VestResult<ValidatedGroupUrl> {
        self.send(
            &ValidateGroupUrlRequest {
                group_user_name: group_user_name.to_string(),
                course_user_name: course_user_name.map(str::to_string),
            },
            None,
        )
        .await
    }

    // =========================================================
    // 项目 (Offers)
    // =========================================================

    /// 列出群组内可见的项目
    pub async fn list_offers(
        &self,
        group_user_name: Option<&str>,
    ) -> VestResult<Vec<OfferSummary>> {
        self.send(
            &ListOffersRequest {
                group_user_name: group_user_name.map(str::to_string),
            },
            None,
        )
        .await
    }

    /// 获取单个项目详情
    pub async fn fetch_offer(&self, project_id: &str) -> VestResult<OfferDetails> {
        self.send(
            &FetchOfferRequest {
                project_id: project_id.to_string(),
            },
            None,
        )
        .await
    }

    /// 创建或更新项目（需要发行人令牌）
    pub async fn create_offer(
        &self,
        token: &str,
        request: CreateOfferRequest,
    ) -> VestResult<OfferSummary> {
        self.send(&request, Some(token)).await
    }
}

/// 非结构化错误按状态码归类
fn status_error(status: u16, path: &str) -> VestError {
    let error = match status {
        401 => VestError::unauthorized(format!("HTTP {}", status)),
        404 => VestError::not_found(format!("HTTP {}", status)),
        400 => VestError::invalid_input(format!("HTTP {}", status)),
        500..=599 => VestError::store(format!("HTTP {}", status)),
        _ => VestError::external_api(format!("HTTP {}", status)),
    };
    error.in_op_with("api.call", path)
}

// =========================================================
// 认证后端实现
// =========================================================

#[async_trait(?Send)]
impl AuthBackend for GroupVestApi {
    async fn restore_session(&self, token: &str) -> VestResult<SessionProfile> {
        self.send(&FetchSessionRequest, Some(token)).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> VestResult<SignInResponse> {
        self.send(
            &SignInRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
            None,
        )
        .await
    }

    async fn sign_up(&self, request: SignUpRequest) -> VestResult<SignInResponse> {
        self.send(&request, None).await
    }

    async fn sign_out(&self, token: &str) -> VestResult<()> {
        self.send(&SignOutRequest, Some(token)).await
    }
}
