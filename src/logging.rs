//! 日志初始化

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// 初始化全局日志，输出到 stderr
///
/// `RUST_LOG` 优先于配置文件中的级别。重复调用不会报错。
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        let config = LoggingConfig::default();
        init(&config);
        init(&config);
        tracing::info!("logging initialized");
    }
}
