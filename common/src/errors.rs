use std::io;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 常规业务错误 ====
    #[error("Resource not found")]
    NotFound,

    #[error("Bad request: {0}")]
    Validation(String),

    #[error("Unauthorized access: {0}")]
    Unauthorized(String),

    #[error("biz error: {0}")]
    BizError(String),

    #[error("External API call failed: {0}")]
    ExternalApi(String),

    // ==== 系统错误 ====
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("参数验证失败: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_becomes_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal(ref m) if m == "boom"));
    }

    #[test]
    fn biz_error_keeps_backend_message() {
        let err = AppError::BizError("菜单不存在".to_string());
        assert_eq!(err.to_string(), "biz error: 菜单不存在");
    }
}
