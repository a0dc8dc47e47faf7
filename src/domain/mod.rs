// ==========================================
// 产线工时目标系统 - 领域模型层
// ==========================================
// 职责: 定义 MH 配置实体、接口载荷与值类型
// 红线: 不含数据访问逻辑,不含调度逻辑
// ==========================================

pub mod mh_config;
pub mod payload;
pub mod types;

// 重导出核心类型
pub use mh_config::{MhConfiguration, MhDerived, MhField, MhInputs, MhRawFields};
pub use payload::{MhConfigPayload, MhConfigRecord};
pub use types::{GapIndication, LineId, PartId};
