// ==========================================
// 产线工时目标系统 - MH 配置编辑会话
// ==========================================
// 职责: 一个编辑对话框/表单实例，独占配置记录及其重算调度器
// 说明: 打开/加载时立即重算；字段编辑走防抖重算
// ==========================================

use crate::api::dto::MhConfigView;
use crate::config::MhSettings;
use crate::domain::mh_config::{MhConfiguration, MhDerived, MhField};
use crate::domain::payload::{MhConfigPayload, MhConfigRecord};
use crate::domain::types::{LineId, PartId};
use crate::engine::{RecomputeOrchestrator, RecomputeReason, RedrawNotifier, SharedConfiguration};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub struct MhEditSession {
    record: SharedConfiguration,
    orchestrator: RecomputeOrchestrator,
}

impl MhEditSession {
    /// 为零件新建配置并打开对话框（需在 tokio 运行时内调用）
    pub fn open_new(
        part: impl Into<PartId>,
        production_line: Option<LineId>,
        notifier: Arc<dyn RedrawNotifier>,
        settings: &MhSettings,
    ) -> Self {
        let config = MhConfiguration::for_part(part, production_line);
        Self::start(config, notifier, settings, RecomputeReason::DialogOpened)
    }

    /// 打开已有配置（派生值按原始字段立即重算，不等待防抖）
    pub fn open_existing(
        record: &MhConfigRecord,
        notifier: Arc<dyn RedrawNotifier>,
        settings: &MhSettings,
    ) -> Self {
        let config = MhConfiguration::from_record(record);
        Self::start(config, notifier, settings, RecomputeReason::Loaded)
    }

    fn start(
        config: MhConfiguration,
        notifier: Arc<dyn RedrawNotifier>,
        settings: &MhSettings,
        reason: RecomputeReason,
    ) -> Self {
        let session_id = Uuid::new_v4().to_string();
        let record = Arc::new(Mutex::new(config));
        let orchestrator =
            RecomputeOrchestrator::spawn(session_id, record.clone(), notifier, settings.debounce());

        // 对话框不得显示过期或空的派生值
        orchestrator.recompute_now(reason);

        tracing::debug!(
            session_id = orchestrator.session_id(),
            reason = reason.as_str(),
            "MH 编辑会话已打开"
        );

        Self {
            record,
            orchestrator,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MhConfiguration> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 编辑原始字段（值变化时安排防抖重算）
    pub fn set_field(&self, field: MhField, value: Option<f64>) {
        let changed = self.lock().set_field(field, value);
        if changed {
            self.orchestrator
                .schedule(RecomputeReason::FieldChanged(field));
        }
    }

    pub fn set_status(&self, status: impl Into<String>) {
        self.lock().status = status.into();
    }

    pub fn set_production_line(&self, production_line: Option<LineId>) {
        self.lock().production_line = production_line;
    }

    pub fn session_id(&self) -> &str {
        self.orchestrator.session_id()
    }

    pub fn id(&self) -> Option<String> {
        self.lock().id.clone()
    }

    pub(crate) fn assign_id(&self, id: String) {
        self.lock().id = Some(id);
    }

    /// 当前配置快照
    pub fn snapshot(&self) -> MhConfiguration {
        self.lock().clone()
    }

    pub fn derived(&self) -> MhDerived {
        self.lock().derived().clone()
    }

    pub fn view(&self) -> MhConfigView {
        MhConfigView::from_configuration(&self.lock())
    }

    /// 提交前立即重算并组装载荷
    pub fn prepare_payload(&self) -> MhConfigPayload {
        self.orchestrator
            .recompute_now_with(RecomputeReason::BeforeSubmit, MhConfiguration::to_payload)
    }

    /// 等待窗口内的防抖重算完成
    pub async fn flush(&self) {
        self.orchestrator.flush().await;
    }

    pub fn orchestrator(&self) -> &RecomputeOrchestrator {
        &self.orchestrator
    }

    /// 关闭会话（丢弃未触发的重算）
    pub fn close(self) {
        self.orchestrator.shutdown();
        tracing::debug!(session_id = self.session_id(), "MH 编辑会话已关闭");
    }
}
