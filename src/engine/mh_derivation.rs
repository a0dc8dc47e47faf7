// ==========================================
// 产线工时目标系统 - MH 派生引擎
// ==========================================
// 职责: 由单件工时/人数/班次时长派生人均班产、班产目标、
//       分时节拍目标、总效率与差距
// 红线: 纯函数，无副作用，不做校验，不抛错
// 取整: 仅在每个量的最后一步取整，中间比值保留全精度
// ==========================================

use crate::domain::mh_config::{MhDerived, MhInputs};

/// 节拍窗口（分钟）
pub const PACING_WINDOWS_MIN: [f64; 4] = [60.0, 50.0, 45.0, 30.0];

/// 四舍五入到最近整数，恰好 .5 时向正无穷方向
///
/// 非有限值（NaN/∞）返回 0，保证引擎全定义。
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded as i64
}

/// 人均班产（未取整）
///
/// mh_per_part <= 0（含未填写）时按 0 处理，避免输入过程中出现 ∞。
pub fn per_head_rate(inputs: &MhInputs) -> f64 {
    if !(inputs.mh_per_part > 0.0) {
        return 0.0;
    }
    let rate = inputs.time_per_shift / inputs.mh_per_part;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// 派生全部计划指标
pub fn derive(inputs: &MhInputs) -> MhDerived {
    // === 步骤 1-3: 人均班产与班产目标 ===
    // 班产目标基于未取整的人均班产，避免二次取整误差
    let per_head_raw = per_head_rate(inputs);
    let target_per_head_shift = round_half_up(per_head_raw);
    let shift_target = round_half_up(per_head_raw * inputs.headcount_target);

    // === 步骤 4-5: 分时节拍目标 ===
    // 每个窗口都由连续的小时产出率直接推得，互不依赖
    let hours_per_shift = inputs.time_per_shift / 60.0;
    let [target_60min, target_50min, target_45min, target_30min] = if hours_per_shift > 0.0 {
        let hourly_rate = shift_target as f64 / hours_per_shift;
        PACING_WINDOWS_MIN.map(|minutes| round_half_up(hourly_rate * minutes / 60.0))
    } else {
        [0; 4]
    };

    // === 步骤 6: 总效率 ===
    let total_efficiency = efficiency(shift_target, inputs);

    // === 步骤 7: 差距 ===
    let gap = shift_target as f64 - inputs.new_shift_target.unwrap_or(0.0);

    tracing::trace!(
        mh_per_part = inputs.mh_per_part,
        headcount_target = inputs.headcount_target,
        time_per_shift = inputs.time_per_shift,
        shift_target,
        "MH 派生完成"
    );

    MhDerived {
        target_per_head_shift,
        output_target_without_control: shift_target,
        shift_target,
        target_60min,
        target_50min,
        target_45min,
        target_30min,
        total_efficiency,
        gap,
    }
}

/// 总效率 (%)
///
/// 仅当 shift_target != 0 且人数、班次时长均 > 0 时可计算，否则为 None。
fn efficiency(shift_target: i64, inputs: &MhInputs) -> Option<f64> {
    if shift_target == 0 || !(inputs.headcount_target > 0.0) || !(inputs.time_per_shift > 0.0) {
        return None;
    }
    let value = (shift_target as f64 * inputs.mh_per_part)
        / (inputs.headcount_target * inputs.time_per_shift)
        * 100.0;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(mh: f64, headcount: f64, minutes: f64) -> MhInputs {
        MhInputs {
            mh_per_part: mh,
            headcount_target: headcount,
            time_per_shift: minutes,
            new_shift_target: None,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(f64::NAN), 0);
        assert_eq!(round_half_up(f64::INFINITY), 0);
    }

    #[test]
    fn test_reference_scenario() {
        let d = derive(&inputs(0.55, 2.0, 465.0));
        assert_eq!(d.target_per_head_shift, 845);
        assert_eq!(d.shift_target, 1691);
        assert_eq!(d.output_target_without_control, 1691);
        assert_eq!(d.target_60min, 218);
        assert_eq!(d.target_50min, 182);
        assert_eq!(d.target_45min, 164);
        assert_eq!(d.target_30min, 109);
        assert_eq!(d.gap, 1691.0);

        let expected = (1691.0 * 0.55) / (2.0 * 465.0) * 100.0;
        let eff = d.total_efficiency.unwrap();
        assert!((eff - expected).abs() < 1e-9);
    }

    #[test]
    fn test_shift_target_uses_unrounded_per_head_rate() {
        // 845.4545 * 2 = 1690.9 → 1691；若先取整则为 1690
        let d = derive(&inputs(0.55, 2.0, 465.0));
        assert_ne!(d.shift_target, d.target_per_head_shift * 2);
    }

    #[test]
    fn test_zero_mh_per_part_yields_zero_targets() {
        let d = derive(&inputs(0.0, 2.0, 465.0));
        assert_eq!(d.target_per_head_shift, 0);
        assert_eq!(d.shift_target, 0);
        assert_eq!(d.target_60min, 0);
        assert!(d.total_efficiency.is_none());
    }

    #[test]
    fn test_non_positive_shift_time_zeroes_pacing() {
        for minutes in [0.0, -30.0] {
            let d = derive(&inputs(0.55, 2.0, minutes));
            assert_eq!(
                [d.target_60min, d.target_50min, d.target_45min, d.target_30min],
                [0, 0, 0, 0]
            );
            assert!(d.total_efficiency.is_none());
        }
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let d = derive(&inputs(0.5, -2.0, 60.0));
        assert_eq!(d.target_per_head_shift, 120);
        assert_eq!(d.shift_target, -240);
        assert_eq!(d.target_60min, -240);
        assert!(d.total_efficiency.is_none());
        assert_eq!(d.gap, -240.0);
    }

    #[test]
    fn test_gap_against_new_shift_target() {
        let mut i = inputs(0.55, 2.0, 465.0);
        i.new_shift_target = Some(1500.0);
        assert_eq!(derive(&i).gap, 191.0);

        i.new_shift_target = Some(1791.0);
        assert_eq!(derive(&i).gap, -100.0);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let i = inputs(0.37, 7.0, 480.0);
        assert_eq!(derive(&i), derive(&i));
    }
}
