// ==========================================
// 产线工时目标系统 - MH 配置领域模型
// ==========================================
// 职责: 定义 MH 配置记录（原始字段 + 派生字段）
// 红线: 派生字段只能由重算调度器写入，任何原始字段变更都使派生值失效
// ==========================================

use crate::domain::payload::{MhConfigPayload, MhConfigRecord};
use crate::domain::types::{LineId, PartId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 新建配置的默认状态
pub const DEFAULT_STATUS: &str = "active";

// ==========================================
// MhInputs - 派生引擎输入
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MhInputs {
    pub mh_per_part: f64,              // 单件工时
    pub headcount_target: f64,         // 配置人数
    pub time_per_shift: f64,           // 班次标准时长 (分钟)
    pub new_shift_target: Option<f64>, // 约定班产目标 (缺省按 0)
}

// ==========================================
// MhDerived - 派生结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MhDerived {
    pub target_per_head_shift: i64,
    pub output_target_without_control: i64,
    pub shift_target: i64,
    pub target_60min: i64,
    pub target_50min: i64,
    pub target_45min: i64,
    pub target_30min: i64,
    /// None 表示不可计算（界面显示 "—"），与 0% 区分
    pub total_efficiency: Option<f64>,
    pub gap: f64,
}

// ==========================================
// MhField - 可编辑的原始字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MhField {
    MhPerPart,
    HeadcountTarget,
    TimePerShift,
    NewShiftTarget,
    DmsShiftTarget,
    BottleneckCycleTime,
    RealOutput,
}

impl MhField {
    pub const ALL: [MhField; 7] = [
        MhField::MhPerPart,
        MhField::HeadcountTarget,
        MhField::TimePerShift,
        MhField::NewShiftTarget,
        MhField::DmsShiftTarget,
        MhField::BottleneckCycleTime,
        MhField::RealOutput,
    ];

    /// 字段名（与接口载荷一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            MhField::MhPerPart => "mh_per_part",
            MhField::HeadcountTarget => "headcount_target",
            MhField::TimePerShift => "time_per_shift",
            MhField::NewShiftTarget => "new_shift_target",
            MhField::DmsShiftTarget => "dms_shift_target",
            MhField::BottleneckCycleTime => "bottleneck_cycle_time",
            MhField::RealOutput => "real_output",
        }
    }

    /// 是否参与派生公式（其余字段仅作标注）
    pub fn drives_derivation(&self) -> bool {
        matches!(
            self,
            MhField::MhPerPart
                | MhField::HeadcountTarget
                | MhField::TimePerShift
                | MhField::NewShiftTarget
        )
    }
}

impl fmt::Display for MhField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// MhRawFields - 用户输入的原始字段
// ==========================================
// None 表示表单中尚未填写
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MhRawFields {
    pub mh_per_part: Option<f64>,
    pub headcount_target: Option<f64>,
    pub time_per_shift: Option<f64>,
    pub new_shift_target: Option<f64>,
    pub dms_shift_target: Option<f64>,
    pub bottleneck_cycle_time: Option<f64>,
    pub real_output: Option<f64>,
}

impl MhRawFields {
    pub fn get(&self, field: MhField) -> Option<f64> {
        match field {
            MhField::MhPerPart => self.mh_per_part,
            MhField::HeadcountTarget => self.headcount_target,
            MhField::TimePerShift => self.time_per_shift,
            MhField::NewShiftTarget => self.new_shift_target,
            MhField::DmsShiftTarget => self.dms_shift_target,
            MhField::BottleneckCycleTime => self.bottleneck_cycle_time,
            MhField::RealOutput => self.real_output,
        }
    }

    fn slot_mut(&mut self, field: MhField) -> &mut Option<f64> {
        match field {
            MhField::MhPerPart => &mut self.mh_per_part,
            MhField::HeadcountTarget => &mut self.headcount_target,
            MhField::TimePerShift => &mut self.time_per_shift,
            MhField::NewShiftTarget => &mut self.new_shift_target,
            MhField::DmsShiftTarget => &mut self.dms_shift_target,
            MhField::BottleneckCycleTime => &mut self.bottleneck_cycle_time,
            MhField::RealOutput => &mut self.real_output,
        }
    }

    /// 转换为引擎输入（未填写的必填字段按 0 参与计算）
    pub fn to_inputs(&self) -> MhInputs {
        MhInputs {
            mh_per_part: self.mh_per_part.unwrap_or(0.0),
            headcount_target: self.headcount_target.unwrap_or(0.0),
            time_per_shift: self.time_per_shift.unwrap_or(0.0),
            new_shift_target: self.new_shift_target,
        }
    }
}

// ==========================================
// MhConfiguration - MH 配置记录
// ==========================================
// 归属: 每条配置属于一个零件，可选限定到某条产线
#[derive(Debug, Clone, PartialEq)]
pub struct MhConfiguration {
    pub id: Option<String>,
    pub part: PartId,
    pub production_line: Option<LineId>,
    pub status: String,
    raw: MhRawFields,
    derived: MhDerived,
    stale: bool,
}

impl MhConfiguration {
    /// 从宿主零件创建新配置（派生值待重算）
    pub fn for_part(part: impl Into<PartId>, production_line: Option<LineId>) -> Self {
        Self {
            id: None,
            part: part.into(),
            production_line,
            status: DEFAULT_STATUS.to_string(),
            raw: MhRawFields::default(),
            derived: MhDerived::default(),
            stale: true,
        }
    }

    /// 从接口返回的记录恢复配置
    ///
    /// 记录中的派生字段一律忽略，恢复后处于待重算状态。
    pub fn from_record(record: &MhConfigRecord) -> Self {
        let p = &record.payload;
        Self {
            id: Some(record.id.clone()),
            part: p.part.clone(),
            production_line: p.production_line.clone(),
            status: p.status.clone(),
            raw: MhRawFields {
                mh_per_part: Some(p.mh_per_part),
                headcount_target: Some(p.headcount_target),
                time_per_shift: Some(p.time_per_shift),
                new_shift_target: Some(p.new_shift_target),
                dms_shift_target: Some(p.dms_shift_target),
                bottleneck_cycle_time: p.bottleneck_cycle_time,
                real_output: p.real_output,
            },
            derived: MhDerived::default(),
            stale: true,
        }
    }

    pub fn raw(&self) -> &MhRawFields {
        &self.raw
    }

    pub fn inputs(&self) -> MhInputs {
        self.raw.to_inputs()
    }

    /// 最近一次计算的派生值（可能已失效，见 `is_stale`）
    pub fn derived(&self) -> &MhDerived {
        &self.derived
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// 更新原始字段
    ///
    /// # 返回
    /// - true: 值发生变化，派生值已失效
    /// - false: 值未变化
    pub fn set_field(&mut self, field: MhField, value: Option<f64>) -> bool {
        let slot = self.raw.slot_mut(field);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.stale = true;
        true
    }

    /// 写入一次重算结果
    pub(crate) fn apply_derived(&mut self, derived: MhDerived) {
        self.derived = derived;
        self.stale = false;
    }

    /// 按当前派生值组装提交载荷
    ///
    /// 调用方须先完成重算（见 `MhEditSession::prepare_payload`）
    pub fn to_payload(&self) -> MhConfigPayload {
        debug_assert!(!self.stale, "派生值未重算，不能组装提交载荷");
        let raw = &self.raw;
        let d = &self.derived;
        MhConfigPayload {
            part: self.part.clone(),
            production_line: self.production_line.clone(),
            mh_per_part: raw.mh_per_part.unwrap_or(0.0),
            headcount_target: raw.headcount_target.unwrap_or(0.0),
            time_per_shift: raw.time_per_shift.unwrap_or(0.0),
            target_per_head_shift: d.target_per_head_shift,
            output_target_without_control: d.output_target_without_control,
            shift_target: d.shift_target,
            target_60min: d.target_60min,
            target_50min: d.target_50min,
            target_45min: d.target_45min,
            target_30min: d.target_30min,
            new_shift_target: raw.new_shift_target.unwrap_or(0.0),
            dms_shift_target: raw.dms_shift_target.unwrap_or(0.0),
            gap: d.gap,
            total_efficiency: d.total_efficiency,
            bottleneck_cycle_time: raw.bottleneck_cycle_time,
            real_output: raw.real_output,
            status: self.status.clone(),
        }
    }
}
