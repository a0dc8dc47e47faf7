// ==========================================
// MH 派生引擎集成测试
// ==========================================
// 测试目标: 公式、取整策略与边界输入的性质
// ==========================================

use mh_planning::engine::round_half_up;
use mh_planning::{derive, MhInputs};

fn inputs(mh: f64, headcount: f64, minutes: f64, new_target: Option<f64>) -> MhInputs {
    MhInputs {
        mh_per_part: mh,
        headcount_target: headcount,
        time_per_shift: minutes,
        new_shift_target: new_target,
    }
}

/// 覆盖常见取值的输入网格
fn positive_grid() -> Vec<MhInputs> {
    let mut grid = Vec::new();
    for mh in [0.05, 0.13, 0.37, 0.55, 1.0, 2.75, 12.5] {
        for headcount in [1.0, 2.0, 3.0, 7.0, 25.0] {
            for minutes in [30.0, 420.0, 465.0, 480.0, 600.0] {
                grid.push(inputs(mh, headcount, minutes, Some(1000.0)));
            }
        }
    }
    grid
}

#[test]
fn test_shift_target_from_unrounded_rate() {
    for i in positive_grid() {
        let d = derive(&i);
        let expected = round_half_up((i.time_per_shift / i.mh_per_part) * i.headcount_target);
        assert_eq!(d.shift_target, expected, "inputs={:?}", i);
        assert_eq!(d.output_target_without_control, d.shift_target);
    }
}

#[test]
fn test_per_head_target_independent_of_headcount() {
    for i in positive_grid() {
        let mut other = i;
        other.headcount_target = i.headcount_target + 4.0;
        assert_eq!(
            derive(&i).target_per_head_shift,
            derive(&other).target_per_head_shift
        );
        assert_eq!(
            derive(&i).target_per_head_shift,
            round_half_up(i.time_per_shift / i.mh_per_part)
        );
    }
}

#[test]
fn test_pacing_targets_non_increasing() {
    for i in positive_grid() {
        let d = derive(&i);
        assert!(d.target_60min >= d.target_50min, "inputs={:?}", i);
        assert!(d.target_50min >= d.target_45min, "inputs={:?}", i);
        assert!(d.target_45min >= d.target_30min, "inputs={:?}", i);
    }
}

#[test]
fn test_pacing_zero_when_shift_time_not_positive() {
    for minutes in [0.0, -1.0, -480.0] {
        for mh in [0.0, 0.5, -0.5] {
            let d = derive(&inputs(mh, 3.0, minutes, None));
            assert_eq!(d.target_60min, 0);
            assert_eq!(d.target_50min, 0);
            assert_eq!(d.target_45min, 0);
            assert_eq!(d.target_30min, 0);
        }
    }
}

#[test]
fn test_efficiency_formula_and_preconditions() {
    for i in positive_grid() {
        let d = derive(&i);
        if d.shift_target == 0 {
            assert!(d.total_efficiency.is_none());
            continue;
        }
        let expected = (d.shift_target as f64 * i.mh_per_part)
            / (i.headcount_target * i.time_per_shift)
            * 100.0;
        let actual = d.total_efficiency.expect("efficiency should be defined");
        assert!((actual - expected).abs() < 1e-9, "inputs={:?}", i);
    }

    assert!(derive(&inputs(0.55, 0.0, 465.0, None)).total_efficiency.is_none());
    assert!(derive(&inputs(0.55, -2.0, 465.0, None)).total_efficiency.is_none());
    assert!(derive(&inputs(0.55, 2.0, 0.0, None)).total_efficiency.is_none());
}

#[test]
fn test_gap_sign_convention() {
    let d = derive(&inputs(0.55, 2.0, 465.0, Some(1500.0)));
    assert_eq!(d.shift_target, 1691);
    assert_eq!(d.gap, 191.0);

    // shift_target=1400 对比约定 1500
    let d = derive(&inputs(1.0, 1.0, 1400.0, Some(1500.0)));
    assert_eq!(d.shift_target, 1400);
    assert_eq!(d.gap, -100.0);

    // 缺省约定目标按 0
    let d = derive(&inputs(1.0, 1.0, 1400.0, None));
    assert_eq!(d.gap, 1400.0);
}

#[test]
fn test_reference_scenario() {
    let d = derive(&inputs(0.55, 2.0, 465.0, None));
    assert_eq!(d.target_per_head_shift, 845);
    assert_eq!(d.shift_target, 1691);
    assert_eq!(
        [d.target_60min, d.target_50min, d.target_45min, d.target_30min],
        [218, 182, 164, 109]
    );
}

#[test]
fn test_zero_mh_per_part_scenario() {
    let d = derive(&inputs(0.0, 2.0, 465.0, None));
    assert_eq!(d.target_per_head_shift, 0);
    assert_eq!(d.shift_target, 0);
    assert!(d.total_efficiency.is_none());
}

#[test]
fn test_non_finite_inputs_stay_total() {
    let d = derive(&inputs(f64::NAN, 2.0, 465.0, None));
    assert_eq!(d.shift_target, 0);

    let d = derive(&inputs(0.55, 2.0, f64::INFINITY, None));
    assert_eq!(d.target_per_head_shift, 0);
    assert_eq!(d.target_60min, 0);
    assert!(d.total_efficiency.is_none());
}

#[test]
fn test_idempotent_serialization() {
    let i = inputs(0.37, 7.0, 480.0, Some(9000.0));
    let a = serde_json::to_vec(&derive(&i)).unwrap();
    let b = serde_json::to_vec(&derive(&i)).unwrap();
    assert_eq!(a, b);
}
