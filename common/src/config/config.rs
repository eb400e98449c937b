use crate::errors::AppError;
use ::config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub api: Option<ApiConfig>,
    pub menu: Option<MenuConfig>,
    pub sys: Option<SysConfig>,
}

impl AppConfig {
    /// 读取配置文件，并允许 `APP_` 前缀的环境变量覆盖
    pub fn load(file: &str) -> Result<Self, AppError> {
        let config = Config::builder()
            .add_source(File::with_name(file).required(true))
            .add_source(Environment::with_prefix("APP").separator("_"))
            .build()?;
        let cfg = config.try_deserialize::<AppConfig>()?;
        Ok(cfg)
    }

    pub fn get_api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }
    pub fn get_menu(&self) -> MenuConfig {
        self.menu.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
}

/// 后端接口配置
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    //请求超时（毫秒）
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    //登录后获得的访问令牌，直接放入 Authorization 头
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_ms: default_timeout_ms(),
            access_token: None,
        }
    }
}

fn default_timeout_ms() -> u64 {
    15_000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MenuConfig {
    //首页路径，为空时取第一个可访问的菜单
    #[serde(default)]
    pub home_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysConfig {
    //全局日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get_api().timeout_ms, 15_000);
        assert_eq!(cfg.get_sys().log_level, "info");
        assert!(cfg.get_menu().home_path.is_none());
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = std::env::temp_dir().join(format!("console-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("console-config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://backend:9000\"\ntimeout_ms = 3000\n\n[menu]\nhome_path = \"/dashboard/console\"\n\n[sys]\nlog_level = \"debug\""
        )
        .unwrap();

        let cfg = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.get_api().base_url, "http://backend:9000");
        assert_eq!(cfg.get_api().timeout_ms, 3000);
        assert_eq!(cfg.get_menu().home_path.as_deref(), Some("/dashboard/console"));
        assert_eq!(cfg.get_sys().log_level, "debug");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let result = AppConfig::load("/definitely/not/here/console-config");
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
