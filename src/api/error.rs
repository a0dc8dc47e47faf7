// ==========================================
// 产线工时目标系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型
// 说明: 校验失败留在表单本地并阻止提交；服务端拒绝原样展示，不自动重试
// ==========================================

use crate::api::gateway::GatewayError;
use crate::config::ConfigError;
use std::collections::BTreeMap;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 表单校验错误
    // ==========================================
    #[error("数据验证失败: {reason}")]
    ValidationFailed {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 外部接口错误
    // ==========================================
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// 字段级错误（表单逐字段展示）
    ///
    /// 校验错误与服务端字段错误都会落到对应字段上
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            ApiError::ValidationFailed { violations, .. } => {
                let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for v in violations {
                    map.entry(v.field.clone()).or_default().push(v.reason.clone());
                }
                map
            }
            ApiError::Gateway(GatewayError::FieldErrors(fields)) => fields.clone(),
            _ => BTreeMap::new(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 字段名（与载荷字段一致）
    pub field: String,
    /// 违规原因（已本地化）
    pub reason: String,
}
