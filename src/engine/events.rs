// ==========================================
// 产线工时目标系统 - 重算事件与重绘通知
// ==========================================
// 职责: 定义重算事件，以及通知显示层重绘的 trait
// 说明: 派生字段不被显示层自动观察，每次重算后必须显式通知
// ==========================================

use crate::domain::mh_config::{MhDerived, MhField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

// ==========================================
// 重算原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecomputeReason {
    /// 原始字段变更（防抖）
    FieldChanged(MhField),
    /// 加载已有配置（立即）
    Loaded,
    /// 打开编辑对话框（立即）
    DialogOpened,
    /// 提交前重算（立即）
    BeforeSubmit,
}

impl RecomputeReason {
    pub fn as_str(&self) -> &str {
        match self {
            RecomputeReason::FieldChanged(_) => "FieldChanged",
            RecomputeReason::Loaded => "Loaded",
            RecomputeReason::DialogOpened => "DialogOpened",
            RecomputeReason::BeforeSubmit => "BeforeSubmit",
        }
    }

    /// 是否走防抖通道
    pub fn is_debounced(&self) -> bool {
        matches!(self, RecomputeReason::FieldChanged(_))
    }
}

/// 重算事件
///
/// 每次重算完成后发给显示层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeEvent {
    /// 编辑会话 ID
    pub session_id: String,
    /// 会话内递增序号
    pub sequence: u64,
    /// 触发原因（合并时取最后一个）
    pub reason: RecomputeReason,
    /// 本次重算合并的请求数
    pub coalesced: u32,
    /// 重算结果
    pub derived: MhDerived,
    pub computed_at: DateTime<Utc>,
}

// ==========================================
// 重绘通知 Trait
// ==========================================

/// 显示层重绘通知者
///
/// 实现方必须非阻塞：通知在编辑会话的协作调度上执行。
pub trait RedrawNotifier: Send + Sync {
    fn request_redraw(&self, event: &RecomputeEvent);
}

/// 空操作通知者
///
/// 用于不需要显示层的场景（如命令行、单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpRedrawNotifier;

impl RedrawNotifier for NoOpRedrawNotifier {
    fn request_redraw(&self, event: &RecomputeEvent) {
        tracing::debug!(
            "NoOpRedrawNotifier: 跳过重绘 - session_id={}, sequence={}, reason={}",
            event.session_id,
            event.sequence,
            event.reason.as_str()
        );
    }
}

/// 基于 watch 通道的通知者
///
/// 显示层持有接收端，只关心最新一次重算结果（后写覆盖）
pub struct WatchRedrawNotifier {
    tx: watch::Sender<Option<RecomputeEvent>>,
}

impl WatchRedrawNotifier {
    pub fn channel() -> (Arc<Self>, watch::Receiver<Option<RecomputeEvent>>) {
        let (tx, rx) = watch::channel(None);
        (Arc::new(Self { tx }), rx)
    }
}

impl RedrawNotifier for WatchRedrawNotifier {
    fn request_redraw(&self, event: &RecomputeEvent) {
        // 同一会话的旧序号晚到时不覆盖新结果；显示层已关闭时不视为错误
        self.tx.send_if_modified(|current| {
            if let Some(latest) = current {
                if latest.session_id == event.session_id && latest.sequence > event.sequence {
                    return false;
                }
            }
            *current = Some(event.clone());
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(sequence: u64) -> RecomputeEvent {
        RecomputeEvent {
            session_id: "S-1".to_string(),
            sequence,
            reason: RecomputeReason::FieldChanged(MhField::HeadcountTarget),
            coalesced: 3,
            derived: MhDerived::default(),
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn test_reason_channel_selection() {
        assert!(RecomputeReason::FieldChanged(MhField::MhPerPart).is_debounced());
        assert!(!RecomputeReason::Loaded.is_debounced());
        assert!(!RecomputeReason::DialogOpened.is_debounced());
        assert!(!RecomputeReason::BeforeSubmit.is_debounced());
    }

    #[test]
    fn test_noop_notifier() {
        let notifier = NoOpRedrawNotifier;
        notifier.request_redraw(&sample_event(1));
    }

    #[test]
    fn test_watch_notifier_keeps_latest() {
        let (notifier, rx) = WatchRedrawNotifier::channel();
        notifier.request_redraw(&sample_event(1));
        notifier.request_redraw(&sample_event(2));

        let latest = rx.borrow().clone().unwrap();
        assert_eq!(latest.sequence, 2);
        assert_eq!(latest.coalesced, 3);
    }

    #[test]
    fn test_watch_notifier_ignores_late_older_event() {
        let (notifier, mut rx) = WatchRedrawNotifier::channel();
        notifier.request_redraw(&sample_event(5));
        let _ = rx.borrow_and_update();

        notifier.request_redraw(&sample_event(4));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().as_ref().map(|e| e.sequence), Some(5));
    }

    #[test]
    fn test_watch_notifier_without_receiver() {
        let (notifier, rx) = WatchRedrawNotifier::channel();
        drop(rx);
        notifier.request_redraw(&sample_event(1));
    }
}
