// ==========================================
// 产线工时目标系统 - 引擎层
// ==========================================
// 职责: MH 派生公式与重算调度
// 红线: 派生引擎为纯函数; 调度器是引擎唯一的调用方
// ==========================================

pub mod events;
pub mod mh_derivation;
pub mod recompute;

// 重导出核心引擎
pub use events::{
    NoOpRedrawNotifier, RecomputeEvent, RecomputeReason, RedrawNotifier, WatchRedrawNotifier,
};
pub use mh_derivation::{derive, round_half_up};
pub use recompute::{RecomputeOrchestrator, SharedConfiguration, DEFAULT_DEBOUNCE_MS};
