// ==========================================
// 产线工时目标系统 - MH 配置接口载荷
// ==========================================
// 职责: 固定字段集的提交载荷（替代动态字典）
// 说明: 派生字段与原始字段一并提交，服务端不是派生值的权威来源
// ==========================================

use crate::domain::types::{LineId, PartId};
use serde::{Deserialize, Serialize};

/// MH 配置 create/update 载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MhConfigPayload {
    pub part: PartId,
    pub production_line: Option<LineId>,

    // ===== 原始输入 =====
    pub mh_per_part: f64,
    pub headcount_target: f64,
    pub time_per_shift: f64,

    // ===== 派生字段 =====
    pub target_per_head_shift: i64,
    pub output_target_without_control: i64,
    pub shift_target: i64,
    pub target_60min: i64,
    pub target_50min: i64,
    pub target_45min: i64,
    pub target_30min: i64,

    // ===== 对比目标 =====
    pub new_shift_target: f64,
    pub dms_shift_target: f64,
    pub gap: f64,

    pub total_efficiency: Option<f64>,

    // ===== 标注字段 =====
    pub bottleneck_cycle_time: Option<f64>,
    pub real_output: Option<f64>,
    pub status: String,
}

/// 外部接口返回的 MH 配置记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MhConfigRecord {
    pub id: String,
    #[serde(flatten)]
    pub payload: MhConfigPayload,
}
