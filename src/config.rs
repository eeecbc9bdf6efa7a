//! 控制台配置
//!
//! YAML 配置文件，查找顺序：`--config` 参数或 `ACADEMY_ADMIN_CONFIG` 环境变量，
//! 否则为 `<config_dir>/academy-admin/config.yaml`。文件不存在时使用默认值。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use academy_client::ClientConfig;

use crate::session::SessionStore;

/// 覆盖 `api.base_url` 的环境变量
pub const BASE_URL_ENV: &str = "ACADEMY_API_BASE_URL";

/// 控制台配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// API 客户端配置
    #[serde(default)]
    pub api: ClientConfig,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 会话文件路径，未设置时使用数据目录
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别或 EnvFilter 指令
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("academy-admin")
            .join("config.yaml")
    }

    /// 加载配置并应用环境变量覆盖
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        let mut config = Self::from_file(&path)?;
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    /// 从文件读取，文件不存在或为空时返回默认配置
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "설정 파일 없음, 기본값 사용");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("설정 파일을 읽을 수 없습니다: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("설정 파일 형식이 올바르지 않습니다: {}", path.display()))
    }

    fn apply_base_url_override(&mut self, base_url: Option<String>) {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            debug!(base_url = %base_url, "환경 변수로 API 주소 지정");
            self.api.base_url = base_url;
        }
    }

    /// 实际使用的会话文件路径
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(SessionStore::default_path)
    }
}
