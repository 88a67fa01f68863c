use std::fmt;

use netinv_shared::ApiErrorBody;

// =========================================================
// 错误类型枚举
// =========================================================

/// 客户端错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 网络层失败（连接拒绝、DNS、fetch 异常）
    Transport,
    /// 401: 凭据错误或令牌过期
    Unauthorized,
    /// 403: 权限不足
    Forbidden,
    /// 404: 资源不存在（包括重复删除）
    NotFound,
    /// 400/422: 服务端校验失败
    Invalid,
    /// 其它非 2xx 响应
    Rejected,
    /// 响应体无法解析
    Decode,
}

impl ApiErrorKind {
    /// 根据 HTTP 状态码归类
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            400 | 409 | 422 => ApiErrorKind::Invalid,
            _ => ApiErrorKind::Rejected,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Transport => "TRANSPORT_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ApiErrorKind::Invalid => "INVALID_INPUT",
            ApiErrorKind::Rejected => "REQUEST_REJECTED",
            ApiErrorKind::Decode => "RESPONSE_DECODE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// - kind: 错误语义
/// - status: HTTP 状态码（网络层失败时为空）
/// - message: 原始消息
/// - detail: 服务端 `{"detail": ...}` 中的文本，原样展示给用户
/// - spans: 发生错误的操作链
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    detail: Option<String>,
    spans: Vec<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            detail: None,
            spans: Vec::new(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    /// 由非 2xx 响应构造，提取服务端的 detail
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = ApiErrorBody::message(body);
        Self {
            kind: ApiErrorKind::from_status(status),
            status: Some(status),
            message: format!("HTTP {}", status),
            detail,
            spans: Vec::new(),
        }
    }

    /// 添加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(operation.into());
        self
    }

    /// 服务端返回的错误文本
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// 表单内联提示：优先服务端文本，否则使用调用方给出的通用提示
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn spans(&self) -> &[String] {
        &self.spans
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        if !self.spans.is_empty() {
            write!(f, " | trace: {}", self.spans.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 表单校验错误
// =========================================================

/// 客户端必填/格式校验失败，请求不会发出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub field: &'static str,
    pub message: String,
}

impl FormError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FormError {}

/// 表单提交失败：本地校验或远端调用
#[derive(Debug, Clone)]
pub enum SubmitError {
    Form(FormError),
    Api(ApiError),
}

impl SubmitError {
    /// 内联提示文本
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SubmitError::Form(e) => e.message.clone(),
            SubmitError::Api(e) => e.user_message(fallback),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Form(e) => write!(f, "{}", e),
            SubmitError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<FormError> for SubmitError {
    fn from(e: FormError) -> Self {
        SubmitError::Form(e)
    }
}

impl From<ApiError> for SubmitError {
    fn from(e: ApiError) -> Self {
        SubmitError::Api(e)
    }
}
