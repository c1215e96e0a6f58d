//! 服务配置模块

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 验证码有效期上限：一天
pub const MAX_VERIFICATION_TTL_MINUTES: i64 = 24 * 60;

/// 服务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// HTTP 服务端口
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    /// 数据库连接串（可被环境变量 DATABASE_URL 覆盖）
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// 验证码有效期（分钟）
    #[serde(default = "default_verification_ttl_minutes")]
    pub verification_ttl_minutes: i64,

    /// 过期验证码清理间隔（秒）
    #[serde(default = "default_expiry_sweep_secs")]
    pub expiry_sweep_secs: u64,
}

fn default_web_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://data/bizdir.db".to_string()
}

fn default_verification_ttl_minutes() -> i64 {
    10
}

fn default_expiry_sweep_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Config {
            web_port: default_web_port(),
            database_url: default_database_url(),
            verification_ttl_minutes: default_verification_ttl_minutes(),
            expiry_sweep_secs: default_expiry_sweep_secs(),
        }
    }
}

impl Config {
    pub fn verification_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.verification_ttl_minutes)
    }

    pub fn expiry_sweep_interval(&self) -> Duration {
        // interval 不接受 0
        Duration::from_secs(self.expiry_sweep_secs.max(1))
    }

    /// 解析 TOML 配置内容
    pub fn from_toml(content: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(content).context("解析配置文件失败")?;
        if !(1..=MAX_VERIFICATION_TTL_MINUTES).contains(&config.verification_ttl_minutes) {
            anyhow::bail!(
                "verification_ttl_minutes 必须在 1 到 {} 之间",
                MAX_VERIFICATION_TTL_MINUTES
            );
        }
        Ok(config)
    }

    /// 环境变量优先于配置文件
    fn apply_env(mut self) -> Config {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database_url = url;
            }
        }
        self
    }
}

/// 加载配置：文件不存在时使用默认配置
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config = Config::from_toml(&content)
            .with_context(|| format!("配置文件无效: {}", path.display()))?;
        tracing::info!("📋 加载配置文件: {}", path.display());
        config
    } else {
        tracing::warn!("未找到配置文件 {}，使用默认配置", path.display());
        Config::default()
    };

    Ok(config.apply_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = Config::from_toml("web_port = 8080\n").unwrap();
        assert_eq!(config.web_port, 8080);
        assert_eq!(config.database_url, "sqlite://data/bizdir.db");
        assert_eq!(config.verification_ttl_minutes, 10);
        assert_eq!(config.expiry_sweep_secs, 60);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("web_port = \"abc\"").is_err());
        assert!(Config::from_toml("verification_ttl_minutes = 0").is_err());
        assert!(Config::from_toml("verification_ttl_minutes = 200000000000").is_err());
        assert!(Config::from_toml("verification_ttl_minutes = 1441").is_err());
        assert_eq!(
            Config::from_toml("verification_ttl_minutes = 1440").unwrap().verification_ttl_minutes,
            MAX_VERIFICATION_TTL_MINUTES
        );
    }

    #[test]
    fn test_sweep_interval_never_zero() {
        let config = Config {
            expiry_sweep_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.expiry_sweep_interval(), Duration::from_secs(1));
        assert_eq!(config.verification_ttl(), chrono::Duration::minutes(10));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("does-not-exist/bizdir.toml")).unwrap();
        assert_eq!(config.web_port, 3000);
    }
}
