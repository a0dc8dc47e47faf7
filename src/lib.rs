// ==========================================
// 产线工时目标系统 - 核心库
// ==========================================
// 职责: MH(人工工时) 目标与效率派生，配置编辑时的防抖重算
// 系统定位: 前端编辑支撑（传输与持久化由外部接口负责）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 派生公式与重算调度
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（配置库连接）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 校验、提交与显示
pub mod api;

// 应用层 - 编辑会话
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    GapIndication, MhConfigPayload, MhConfigRecord, MhConfiguration, MhDerived, MhField,
    MhInputs,
};

pub use engine::{derive, RecomputeOrchestrator, RecomputeReason, RedrawNotifier};

pub use api::{ApiError, ApiResult, MhConfigApi, MhConfigGateway, MhConfigView};

pub use app::MhEditSession;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线工时目标系统";
