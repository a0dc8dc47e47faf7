// ==========================================
// 产线工时目标系统 - 提交前校验器
// ==========================================
// 职责: 调用方校验（派生引擎本身不校验）
// 规则:
// - mh_per_part / headcount_target / time_per_shift 必填且 > 0
// - headcount_target 必须为整数
// - 约定目标、瓶颈节拍、实际产出填写时不能为负
// - 必须指定所属零件
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::mh_config::{MhConfiguration, MhField};
use crate::i18n::{t, t_with_args};

const REQUIRED_POSITIVE: [MhField; 3] = [
    MhField::MhPerPart,
    MhField::HeadcountTarget,
    MhField::TimePerShift,
];

const OPTIONAL_NON_NEGATIVE: [MhField; 4] = [
    MhField::NewShiftTarget,
    MhField::DmsShiftTarget,
    MhField::BottleneckCycleTime,
    MhField::RealOutput,
];

/// 本地化后的字段名
pub fn field_label(field: MhField) -> String {
    t(&format!("fields.{}", field.as_str()))
}

fn violation(field: &str, key: &str, label: &str) -> ValidationViolation {
    ValidationViolation {
        field: field.to_string(),
        reason: t_with_args(key, &[("field", label)]),
    }
}

/// 收集全部违规项（不在首个错误处中断）
pub fn collect_violations(config: &MhConfiguration) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    let raw = config.raw();

    if config.part.trim().is_empty() {
        violations.push(ValidationViolation {
            field: "part".to_string(),
            reason: t("validation.part_required"),
        });
    }

    for field in REQUIRED_POSITIVE {
        let label = field_label(field);
        match raw.get(field) {
            None => violations.push(violation(field.as_str(), "validation.required", &label)),
            Some(v) if !v.is_finite() || v <= 0.0 => {
                violations.push(violation(field.as_str(), "validation.must_be_positive", &label))
            }
            Some(v) if field == MhField::HeadcountTarget && v.fract() != 0.0 => {
                violations.push(violation(field.as_str(), "validation.must_be_whole", &label))
            }
            Some(_) => {}
        }
    }

    for field in OPTIONAL_NON_NEGATIVE {
        if let Some(v) = raw.get(field) {
            if !v.is_finite() || v < 0.0 {
                let label = field_label(field);
                violations.push(violation(
                    field.as_str(),
                    "validation.must_be_non_negative",
                    &label,
                ));
            }
        }
    }

    violations
}

/// 提交前校验
///
/// # 返回
/// - Ok(()): 可以提交
/// - Err(ApiError::ValidationFailed): 存在违规项，阻止提交
pub fn validate_for_submission(config: &MhConfiguration) -> ApiResult<()> {
    let violations = collect_violations(config);
    if violations.is_empty() {
        return Ok(());
    }

    let count = violations.len().to_string();
    tracing::warn!(
        part = %config.part,
        violations = violations.len(),
        "MH 配置校验未通过，阻止提交"
    );
    Err(ApiError::ValidationFailed {
        reason: t_with_args("validation.summary", &[("count", &count)]),
        violations,
    })
}
