// ==========================================
// 产线工时目标系统 - 应用层
// ==========================================
// 职责: 编辑会话与启动配置
// ==========================================

pub mod edit_session;
pub mod state;

pub use edit_session::MhEditSession;
pub use state::{bootstrap_settings, get_default_db_path};
