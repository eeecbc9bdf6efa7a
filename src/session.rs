//! 登录会话持久化
//!
//! 登录后保存 cookie 和用户信息，之后的命令在发请求前恢复到传输层。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use academy_core::User;

/// 已保存的会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Cookie 头（`name=value; ...`）
    pub cookies: String,
    pub user: User,
    pub saved_at: DateTime<Utc>,
}

impl Session {
    pub fn new(cookies: impl Into<String>, user: User) -> Self {
        Self {
            cookies: cookies.into(),
            user,
            saved_at: Utc::now(),
        }
    }
}

/// 会话文件
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认会话文件路径
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("academy-admin")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取会话，文件不存在时返回 None
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("세션 파일을 읽을 수 없습니다: {}", self.path.display()))?;
        let session = serde_json::from_str(&content).with_context(|| {
            format!(
                "세션 파일이 손상되었습니다. 다시 로그인하세요: {}",
                self.path.display()
            )
        })?;
        debug!(path = %self.path.display(), "세션 복원");
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("디렉터리를 만들 수 없습니다: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("세션 파일을 쓸 수 없습니다: {}", self.path.display()))?;
        info!(user = %session.user.username, path = %self.path.display(), "세션 저장");
        Ok(())
    }

    /// 删除会话文件，返回是否存在过
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("세션 파일을 삭제할 수 없습니다: {}", self.path.display()))?;
        Ok(true)
    }
}
