use crate::errors::AppError;
use log::LevelFilter;
use std::str::FromStr;

/// 按配置的日志级别初始化 env_logger，`RUST_LOG` 仍可覆盖单个模块
pub fn init_log(log_level: &str) -> Result<(), AppError> {
    let level = LevelFilter::from_str(log_level)
        .map_err(|_| AppError::Validation(format!("非法的日志级别: {}", log_level)))?;
    let mut builder = env_logger::Builder::new();
    builder.filter(None, level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init().map_err(|e| AppError::Internal(e.to_string()))
}
