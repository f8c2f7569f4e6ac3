use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 包含错误对应的语义（状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestErrorStatus {
    /// 500: 底层基础设施错误 (如存储读写失败, I/O 错误)
    Store,
    /// 404: 资源未找到（群组、项目、用户等）
    NotFound,
    /// 400: 业务逻辑校验失败
    InvalidInput,
    /// 401: 鉴权失败或令牌过期
    Unauthorized,
    /// 400: JSON 解析或序列化错误 (专用错误类型)
    Serialization,
    /// 502: 外部服务调用失败 (如身份提供方不可达)
    ExternalApi,
}

impl VestErrorStatus {
    pub fn status_code(&self) -> u16 {
        match self {
            VestErrorStatus::InvalidInput | VestErrorStatus::Serialization => 400,
            VestErrorStatus::Unauthorized => 401,
            VestErrorStatus::NotFound => 404,
            VestErrorStatus::Store => 500,
            VestErrorStatus::ExternalApi => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            VestErrorStatus::InvalidInput => "INVALID_INPUT",
            VestErrorStatus::Serialization => "JSON_PARSE_ERROR",
            VestErrorStatus::Unauthorized => "UNAUTHORIZED",
            VestErrorStatus::NotFound => "RESOURCE_NOT_FOUND",
            VestErrorStatus::Store => "INTERNAL_STORE_ERROR",
            VestErrorStatus::ExternalApi => "UPSTREAM_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
/// 记录错误发生时的操作和相关细节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.fetch_session", "guard.validate_group"
    pub operation: String,
    /// 额外的细节信息，如群组 slug、project id 等
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// Application Domain Errors
///
/// 这是一个高内聚的错误定义，包含：
/// - status: 错误类型/语义
/// - message: 错误消息
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct VestError {
    pub status: VestErrorStatus,
    pub message: String,
    /// 原始错误源（供调试用，不参与序列化）
    source: Option<Box<dyn std::error::Error>>,
    /// 结构化的操作追踪
    spans: Vec<ErrorSpan>,
}

impl VestError {
    pub fn new(status: VestErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(VestErrorStatus::Store, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(VestErrorStatus::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(VestErrorStatus::InvalidInput, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(VestErrorStatus::Unauthorized, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(VestErrorStatus::Serialization, message)
    }

    pub fn external_api(message: impl Into<String>) -> Self {
        Self::new(VestErrorStatus::ExternalApi, message)
    }

    // --- Context builders (Builder Pattern) ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    /// 获取对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        self.status.status_code()
    }

    /// 获取机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// 获取错误消息
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取操作追踪栈
    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for VestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        // 如果有 spans，追加显示
        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for VestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type VestResult<T> = std::result::Result<T, VestError>;

// =========================================================
// 传输用错误类型
// =========================================================

/// 用于在 HTTP Header 中标识该 Response Body 是一个 ErrorResponse
pub const RPC_ERROR_HEADER: &str = "X-Rpc-Error";

/// 专用于传输的错误类型
///
/// 设计用于：
/// 1. 携带完整的错误上下文（状态、消息、追踪栈）
/// 2. 序列化为 JSON 字符串并作为 Response body 返回
/// 3. 从 Response body 中恢复并转回 VestError
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误状态（直接序列化枚举，避免 code 字符串映射）
    pub status: VestErrorStatus,
    /// 错误消息
    pub message: String,
    /// 结构化的操作追踪栈
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<ErrorSpan>,
}

impl ErrorResponse {
    pub fn new(status: VestErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        self.status.status_code()
    }
}

// =========================================================
// 类型转换实现
// =========================================================

impl From<VestError> for ErrorResponse {
    fn from(e: VestError) -> Self {
        Self {
            status: e.status,
            message: e.message,
            spans: e.spans,
        }
    }
}

impl From<ErrorResponse> for VestError {
    fn from(e: ErrorResponse) -> Self {
        Self {
            status: e.status,
            message: e.message,
            source: None, // source 不可序列化，跨边界传输时丢失
            spans: e.spans,
        }
    }
}
