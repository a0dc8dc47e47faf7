// ==========================================
// 产线工时目标系统 - MH 配置 API
// ==========================================
// 职责: 打开/加载/保存 MH 配置
// 保存流程: 校验 → 提交前重算 → 组装载荷 → create/update
// 红线: 派生值以客户端计算为准，加载时不信任服务端存储的派生值
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::gateway::MhConfigGateway;
use crate::api::validator::validate_for_submission;
use crate::app::edit_session::MhEditSession;
use crate::config::MhSettings;
use crate::domain::payload::MhConfigRecord;
use crate::domain::types::{LineId, PartId};
use crate::engine::RedrawNotifier;
use std::sync::Arc;

pub struct MhConfigApi {
    gateway: Arc<dyn MhConfigGateway>,
    settings: MhSettings,
}

impl MhConfigApi {
    /// 创建 API（同时应用配置中的界面语言）
    pub fn new(gateway: Arc<dyn MhConfigGateway>, settings: MhSettings) -> Self {
        crate::i18n::set_locale(&settings.locale);
        Self { gateway, settings }
    }

    pub fn settings(&self) -> &MhSettings {
        &self.settings
    }

    /// 为零件打开新建对话框
    pub fn open_new(
        &self,
        part: impl Into<PartId>,
        production_line: Option<LineId>,
        notifier: Arc<dyn RedrawNotifier>,
    ) -> MhEditSession {
        MhEditSession::open_new(part, production_line, notifier, &self.settings)
    }

    /// 加载已有配置并打开编辑对话框
    pub async fn load(
        &self,
        id: &str,
        notifier: Arc<dyn RedrawNotifier>,
    ) -> ApiResult<MhEditSession> {
        let record = self
            .gateway
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("MH配置(id={})不存在", id)))?;

        tracing::info!(id, part = %record.payload.part, "MH 配置已加载");
        Ok(MhEditSession::open_existing(&record, notifier, &self.settings))
    }

    /// 保存（无 id 时新建，否则更新）
    ///
    /// # 返回
    /// - Ok(MhConfigRecord): 服务端返回的记录
    /// - Err(ApiError::ValidationFailed): 校验未通过，未发起请求
    /// - Err(ApiError::Gateway): 服务端拒绝，原样返回，不重试
    pub async fn save(&self, session: &MhEditSession) -> ApiResult<MhConfigRecord> {
        validate_for_submission(&session.snapshot())?;

        let payload = session.prepare_payload();
        let result = match session.id() {
            Some(id) => self.gateway.update(&id, &payload).await,
            None => self.gateway.create(&payload).await,
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    id = %record.id,
                    part = %payload.part,
                    shift_target = payload.shift_target,
                    "MH 配置已保存"
                );
                session.assign_id(record.id.clone());
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(part = %payload.part, error = %e, "MH 配置保存被拒绝");
                Err(e.into())
            }
        }
    }
}
