// ==========================================
// 产线工时目标系统 - 重算配置读取 Trait
// ==========================================
// 职责: 编辑会话所需的配置读取接口与配置快照
// 实现者: ConfigManager（从 config_kv 表读取）
// ==========================================

use crate::config::config_manager::ConfigResult;
use crate::engine::DEFAULT_DEBOUNCE_MS;
use async_trait::async_trait;
use std::time::Duration;

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 防抖窗口下限（毫秒）
pub const MIN_DEBOUNCE_MS: u64 = 10;

/// 防抖窗口上限（毫秒）
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

#[async_trait]
pub trait RecomputeConfigReader: Send + Sync {
    /// 获取重算防抖窗口（毫秒）
    ///
    /// # 默认值
    /// - 150，取值范围 [10, 5000]
    async fn get_recompute_debounce_ms(&self) -> ConfigResult<u64>;

    /// 获取界面语言
    ///
    /// # 默认值
    /// - zh-CN
    async fn get_ui_locale(&self) -> ConfigResult<String>;
}

// ==========================================
// MhSettings - 配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MhSettings {
    pub debounce_ms: u64,
    pub locale: String,
}

impl MhSettings {
    /// 从配置读取器加载
    pub async fn load(reader: &dyn RecomputeConfigReader) -> ConfigResult<Self> {
        Ok(Self {
            debounce_ms: reader.get_recompute_debounce_ms().await?,
            locale: reader.get_ui_locale().await?,
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for MhSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}
