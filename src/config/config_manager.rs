// ==========================================
// 产线工时目标系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::mh_settings::{
    RecomputeConfigReader, DEFAULT_LOCALE, MAX_DEBOUNCE_MS, MIN_DEBOUNCE_MS,
};
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::engine::DEFAULT_DEBOUNCE_MS;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const RECOMPUTE_DEBOUNCE_MS: &str = "mh.recompute_debounce_ms";
    pub const UI_LOCALE: &str = "ui.locale";
}

/// 配置层错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置锁获取失败: {0}")]
    Lock(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（配置表不存在时自动创建）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }
}

// ==========================================
// RecomputeConfigReader Trait 实现
// ==========================================
#[async_trait]
impl RecomputeConfigReader for ConfigManager {
    async fn get_recompute_debounce_ms(&self) -> ConfigResult<u64> {
        let default = DEFAULT_DEBOUNCE_MS.to_string();
        let value = self.get_config_or_default(config_keys::RECOMPUTE_DEBOUNCE_MS, &default)?;

        match value.trim().parse::<u64>() {
            Ok(ms) => Ok(ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS)),
            Err(_) => {
                tracing::warn!(
                    config_key = config_keys::RECOMPUTE_DEBOUNCE_MS,
                    raw_value = %value,
                    "防抖窗口配置格式错误，使用默认值"
                );
                Ok(DEFAULT_DEBOUNCE_MS)
            }
        }
    }

    async fn get_ui_locale(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::UI_LOCALE, DEFAULT_LOCALE)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Ok(DEFAULT_LOCALE.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let manager = in_memory();
        assert_eq!(
            manager.get_recompute_debounce_ms().await.unwrap(),
            DEFAULT_DEBOUNCE_MS
        );
        assert_eq!(manager.get_ui_locale().await.unwrap(), DEFAULT_LOCALE);
    }

    #[tokio::test]
    async fn test_debounce_is_clamped() {
        let manager = in_memory();
        manager
            .set_config_value(config_keys::RECOMPUTE_DEBOUNCE_MS, "1")
            .unwrap();
        assert_eq!(
            manager.get_recompute_debounce_ms().await.unwrap(),
            MIN_DEBOUNCE_MS
        );

        manager
            .set_config_value(config_keys::RECOMPUTE_DEBOUNCE_MS, "999999")
            .unwrap();
        assert_eq!(
            manager.get_recompute_debounce_ms().await.unwrap(),
            MAX_DEBOUNCE_MS
        );
    }

    #[tokio::test]
    async fn test_malformed_debounce_falls_back() {
        let manager = in_memory();
        manager
            .set_config_value(config_keys::RECOMPUTE_DEBOUNCE_MS, "fast")
            .unwrap();
        assert_eq!(
            manager.get_recompute_debounce_ms().await.unwrap(),
            DEFAULT_DEBOUNCE_MS
        );
    }

    #[test]
    fn test_set_overwrites_value() {
        let manager = in_memory();
        manager.set_config_value(config_keys::UI_LOCALE, "en").unwrap();
        manager.set_config_value(config_keys::UI_LOCALE, "zh-CN").unwrap();
        assert_eq!(
            manager.get_config_value(config_keys::UI_LOCALE).unwrap(),
            Some("zh-CN".to_string())
        );
    }
}
