// ==========================================
// 产线工时目标系统 - 配置层
// ==========================================
// 职责: 系统配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod mh_settings;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult};
pub use mh_settings::{MhSettings, RecomputeConfigReader, DEFAULT_LOCALE};
