// ==========================================
// 产线工时目标系统 - 显示层 DTO
// ==========================================
// 职责: 将 MH 配置转换为可直接渲染的文本
// 说明: 效率不可计算时显示 "—"，与 0% 区分；负值保留符号
// ==========================================

use crate::domain::mh_config::MhConfiguration;
use crate::domain::types::{GapIndication, LineId, PartId};
use serde::{Deserialize, Serialize};

/// 不可计算占位符
pub const NOT_COMPUTABLE: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MhConfigView {
    pub part: PartId,
    pub production_line: Option<LineId>,
    pub status: String,

    pub target_per_head_shift: String,
    pub shift_target: String,
    pub output_target_without_control: String,
    pub target_60min: String,
    pub target_50min: String,
    pub target_45min: String,
    pub target_30min: String,

    pub total_efficiency: String,
    pub gap: String,
    pub gap_indication: GapIndication,

    /// 派生值是否等待重算
    pub pending_recompute: bool,
}

impl MhConfigView {
    pub fn from_configuration(config: &MhConfiguration) -> Self {
        let d = config.derived();
        Self {
            part: config.part.clone(),
            production_line: config.production_line.clone(),
            status: config.status.clone(),
            target_per_head_shift: d.target_per_head_shift.to_string(),
            shift_target: d.shift_target.to_string(),
            output_target_without_control: d.output_target_without_control.to_string(),
            target_60min: d.target_60min.to_string(),
            target_50min: d.target_50min.to_string(),
            target_45min: d.target_45min.to_string(),
            target_30min: d.target_30min.to_string(),
            total_efficiency: format_efficiency(d.total_efficiency),
            gap: format_number(d.gap),
            gap_indication: GapIndication::from_gap(d.gap),
            pending_recompute: config.is_stale(),
        }
    }
}

/// 效率: 一位小数 + "%"，不可计算时为 "—"
pub fn format_efficiency(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => NOT_COMPUTABLE.to_string(),
    }
}

/// 整数值不带小数，其余保留两位
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mh_config::MhField;
    use crate::engine::derive;

    #[test]
    fn test_efficiency_placeholder() {
        assert_eq!(format_efficiency(None), "—");
        assert_eq!(format_efficiency(Some(0.0)), "0.0%");
        assert_eq!(format_efficiency(Some(100.00537)), "100.0%");
    }

    #[test]
    fn test_view_keeps_sign_and_indication() {
        let mut config = MhConfiguration::for_part("P-1", None);
        config.set_field(MhField::MhPerPart, Some(0.55));
        config.set_field(MhField::HeadcountTarget, Some(2.0));
        config.set_field(MhField::TimePerShift, Some(465.0));
        config.set_field(MhField::NewShiftTarget, Some(1791.0));
        config.apply_derived(derive(&config.inputs()));

        let view = MhConfigView::from_configuration(&config);
        assert_eq!(view.shift_target, "1691");
        assert_eq!(view.gap, "-100");
        assert_eq!(view.gap_indication, GapIndication::Surplus);
        assert_eq!(view.total_efficiency, "100.0%");
        assert!(!view.pending_recompute);
    }

    #[test]
    fn test_view_keeps_sign_of_negative_targets() {
        let mut config = MhConfiguration::for_part("P-1", None);
        config.set_field(MhField::MhPerPart, Some(0.5));
        config.set_field(MhField::HeadcountTarget, Some(-2.0));
        config.set_field(MhField::TimePerShift, Some(60.0));
        config.apply_derived(derive(&config.inputs()));

        let view = MhConfigView::from_configuration(&config);
        assert_eq!(view.target_per_head_shift, "120");
        assert_eq!(view.shift_target, "-240");
        assert_eq!(view.output_target_without_control, "-240");
        assert_eq!(view.target_60min, "-240");
        assert_eq!(view.target_30min, "-120");
        assert_eq!(view.gap, "-240");
        assert_eq!(view.gap_indication, GapIndication::Surplus);
        assert_eq!(view.total_efficiency, NOT_COMPUTABLE);
    }

    #[test]
    fn test_view_of_new_configuration() {
        let config = MhConfiguration::for_part("P-1", None);
        let view = MhConfigView::from_configuration(&config);
        assert_eq!(view.total_efficiency, NOT_COMPUTABLE);
        assert_eq!(view.gap, "0");
        assert_eq!(view.gap_indication, GapIndication::OnTarget);
    }

    #[test]
    fn test_fractional_gap() {
        assert_eq!(format_number(-12.5), "-12.50");
        assert_eq!(format_number(191.0), "191");
    }
}
