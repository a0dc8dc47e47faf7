// ==========================================
// 产线工时目标系统 - API 层
// ==========================================
// 职责: 校验、提交、加载与显示转换
// 说明: 传输与持久化由外部接口 (MhConfigGateway) 负责
// ==========================================

pub mod dto;
pub mod error;
pub mod gateway;
pub mod mh_config_api;
pub mod validator;

pub use dto::MhConfigView;
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use gateway::{GatewayError, MhConfigGateway};
pub use mh_config_api::MhConfigApi;
pub use validator::{collect_violations, validate_for_submission};
