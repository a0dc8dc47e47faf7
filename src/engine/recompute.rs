// ==========================================
// 产线工时目标系统 - 重算调度器
// ==========================================
// 职责: 原始字段变更后防抖重算派生字段，并通知显示层重绘
// 防抖: 窗口内的连续请求合并为一次重算（取最新值，后写覆盖）
// 立即通道: 加载/打开对话框时同步重算，不经过防抖
// 说明: 引擎全定义，本调度器没有失败路径；也是派生引擎的唯一调用方
// ==========================================

use crate::domain::mh_config::{MhConfiguration, MhDerived};
use crate::engine::events::{RecomputeEvent, RecomputeReason, RedrawNotifier};
use crate::engine::mh_derivation::derive;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// 默认防抖窗口（毫秒）
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// 编辑会话独占的配置记录
pub type SharedConfiguration = Arc<Mutex<MhConfiguration>>;

enum Command {
    Schedule(RecomputeReason),
    Flush(oneshot::Sender<()>),
}

// ==========================================
// 重算执行体（防抖任务与同步通道共用）
// ==========================================
struct RecomputeCore {
    session_id: String,
    record: SharedConfiguration,
    notifier: Arc<dyn RedrawNotifier>,
    sequence: AtomicU64,
}

impl RecomputeCore {
    fn recompute(&self, reason: RecomputeReason, coalesced: u32) -> MhDerived {
        self.recompute_with(reason, coalesced, |record| record.derived().clone())
    }

    /// 重算并在同一把锁内读取记录
    fn recompute_with<R>(
        &self,
        reason: RecomputeReason,
        coalesced: u32,
        read: impl FnOnce(&MhConfiguration) -> R,
    ) -> R {
        let (derived, sequence, output) = {
            // 记录仅由单个会话持有，锁中毒时沿用内部数据
            let mut record = self.record.lock().unwrap_or_else(PoisonError::into_inner);
            let derived = derive(&record.inputs());
            record.apply_derived(derived.clone());
            // 序号在持锁期间分配，与记录写入顺序一致
            let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            (derived, sequence, read(&*record))
        };

        tracing::debug!(
            session_id = %self.session_id,
            sequence,
            reason = reason.as_str(),
            coalesced,
            shift_target = derived.shift_target,
            "派生字段已重算"
        );

        let event = RecomputeEvent {
            session_id: self.session_id.clone(),
            sequence,
            reason,
            coalesced,
            derived,
            computed_at: Utc::now(),
        };
        self.notifier.request_redraw(&event);
        output
    }
}

// ==========================================
// RecomputeOrchestrator
// ==========================================
pub struct RecomputeOrchestrator {
    core: Arc<RecomputeCore>,
    tx: mpsc::UnboundedSender<Command>,
    shutdown: CancellationToken,
    debounce: Duration,
}

impl RecomputeOrchestrator {
    /// 启动调度器（需在 tokio 运行时内调用）
    ///
    /// # 参数
    /// - session_id: 所属编辑会话
    /// - record: 会话独占的配置记录
    /// - notifier: 显示层重绘通知者
    /// - debounce: 防抖窗口
    pub fn spawn(
        session_id: impl Into<String>,
        record: SharedConfiguration,
        notifier: Arc<dyn RedrawNotifier>,
        debounce: Duration,
    ) -> Self {
        let core = Arc::new(RecomputeCore {
            session_id: session_id.into(),
            record,
            notifier,
            sequence: AtomicU64::new(0),
        });
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        tokio::spawn(run_debounce_loop(
            core.clone(),
            rx,
            debounce,
            shutdown.clone(),
        ));

        Self {
            core,
            tx,
            shutdown,
            debounce,
        }
    }

    /// 请求一次防抖重算（不阻塞）
    ///
    /// 防抖任务已停止时改为同步重算，变更不会丢失
    pub fn schedule(&self, reason: RecomputeReason) {
        if self.shutdown.is_cancelled() || self.tx.send(Command::Schedule(reason)).is_err() {
            tracing::debug!(
                session_id = %self.core.session_id,
                "防抖任务已停止，改为同步重算"
            );
            self.core.recompute(reason, 1);
        }
    }

    /// 立即同步重算并通知显示层
    pub fn recompute_now(&self, reason: RecomputeReason) -> MhDerived {
        self.core.recompute(reason, 1)
    }

    /// 立即同步重算，并在重算结果写入的同一时刻读取记录
    pub fn recompute_now_with<R>(
        &self,
        reason: RecomputeReason,
        read: impl FnOnce(&MhConfiguration) -> R,
    ) -> R {
        self.core.recompute_with(reason, 1, read)
    }

    /// 立即执行窗口内尚未触发的防抖重算，并等待其完成
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    /// 停止防抖任务
    ///
    /// 窗口内未触发的重算直接丢弃，之后的 `schedule` 走同步重算
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// 已完成的重算次数
    pub fn recompute_count(&self) -> u64 {
        self.core.sequence.load(Ordering::SeqCst)
    }

    pub fn debounce_window(&self) -> Duration {
        self.debounce
    }

    pub fn session_id(&self) -> &str {
        &self.core.session_id
    }
}

impl Drop for RecomputeOrchestrator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// ==========================================
// 防抖循环
// ==========================================
async fn run_debounce_loop(
    core: Arc<RecomputeCore>,
    mut rx: mpsc::UnboundedReceiver<Command>,
    debounce: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let first = tokio::select! {
            _ = shutdown.cancelled() => break,
            cmd = rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let mut reason = match first {
            Command::Schedule(reason) => reason,
            Command::Flush(ack) => {
                // 无待处理请求
                let _ = ack.send(());
                continue;
            }
        };
        let mut coalesced: u32 = 1;
        let mut deadline = Instant::now() + debounce;
        let mut acks = Vec::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = sleep_until(deadline) => break,
                cmd = rx.recv() => match cmd {
                    Some(Command::Schedule(next)) => {
                        // 新请求取代旧请求，窗口顺延
                        reason = next;
                        coalesced = coalesced.saturating_add(1);
                        deadline = Instant::now() + debounce;
                    }
                    Some(Command::Flush(ack)) => {
                        acks.push(ack);
                        break;
                    }
                    None => break,
                },
            }
        }

        core.recompute(reason, coalesced);
        for ack in acks {
            let _ = ack.send(());
        }
    }

    tracing::debug!(session_id = %core.session_id, "防抖任务已退出");
}
