// ==========================================
// 产线工时目标系统 - 领域类型定义
// ==========================================
// 职责: 标识类型、差距指示等与具体实体无关的值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 零件 ID（宿主实体，由外部接口分配）
pub type PartId = String;

/// 产线 ID（可选作用域）
pub type LineId = String;

// ==========================================
// 差距指示 (Gap Indication)
// ==========================================
// 符号约定: gap = shift_target - new_shift_target
// - gap > 0: 计算目标高于约定目标 → 短缺风险（红）
// - gap < 0: 计算目标低于约定目标 → 富余（绿）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapIndication {
    Shortfall, // 红
    Surplus,   // 绿
    OnTarget,  // 持平
}

impl GapIndication {
    /// 按差距符号判定指示类型
    pub fn from_gap(gap: f64) -> Self {
        if gap > 0.0 {
            GapIndication::Shortfall
        } else if gap < 0.0 {
            GapIndication::Surplus
        } else {
            GapIndication::OnTarget
        }
    }

    /// 界面渲染颜色
    pub fn color(&self) -> &'static str {
        match self {
            GapIndication::Shortfall => "red",
            GapIndication::Surplus => "green",
            GapIndication::OnTarget => "default",
        }
    }
}

impl fmt::Display for GapIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapIndication::Shortfall => write!(f, "SHORTFALL"),
            GapIndication::Surplus => write!(f, "SURPLUS"),
            GapIndication::OnTarget => write!(f, "ON_TARGET"),
        }
    }
}
