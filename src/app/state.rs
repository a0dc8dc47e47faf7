// ==========================================
// 产线工时目标系统 - 应用启动状态
// ==========================================
// 职责: 解析配置库路径，加载配置并应用界面语言
// ==========================================

use crate::api::ApiResult;
use crate::config::{ConfigManager, MhSettings};
use std::path::PathBuf;

/// 配置库路径环境变量
pub const DB_PATH_ENV: &str = "MH_PLANNING_DB_PATH";

/// 获取默认配置库路径
///
/// 优先级: 环境变量 → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./mh_planning.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("mh-planning");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("mh_planning.db");
        }
    }

    path.to_string_lossy().to_string()
}

/// 加载配置并设置界面语言
pub async fn bootstrap_settings(db_path: &str) -> ApiResult<MhSettings> {
    let manager = ConfigManager::new(db_path)?;
    let settings = MhSettings::load(&manager).await?;
    crate::i18n::set_locale(&settings.locale);

    tracing::info!(
        db_path,
        debounce_ms = settings.debounce_ms,
        locale = %settings.locale,
        "配置已加载"
    );
    Ok(settings)
}
