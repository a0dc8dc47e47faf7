// ==========================================
// 产线工时目标系统 - 命令行入口
// ==========================================
// 用法:
//   mh-planning <mh_per_part> <headcount_target> <time_per_shift> [new_shift_target]
//
// 按输入派生全部计划指标，校验后输出提交载荷与显示文本 (JSON)
// ==========================================

use anyhow::{Context, Result};
use mh_planning::api::collect_violations;
use mh_planning::app::{bootstrap_settings, get_default_db_path};
use mh_planning::engine::NoOpRedrawNotifier;
use mh_planning::{logging, MhEditSession, MhField};
use serde_json::json;
use std::sync::Arc;

fn parse_arg(raw: Option<String>, field: MhField) -> Result<Option<f64>> {
    match raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(s) => {
            let value = s
                .parse::<f64>()
                .with_context(|| format!("{} 无法解析: {}", field, s))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    tracing::info!("{} v{}", mh_planning::APP_NAME, mh_planning::VERSION);

    let db_path = get_default_db_path();
    let settings = bootstrap_settings(&db_path)
        .await
        .with_context(|| format!("加载配置失败: {}", db_path))?;
    tracing::debug!(locale = %settings.locale, "界面语言");

    let session = MhEditSession::open_new("cli", None, Arc::new(NoOpRedrawNotifier), &settings);
    let mut args = std::env::args().skip(1);
    for field in [
        MhField::MhPerPart,
        MhField::HeadcountTarget,
        MhField::TimePerShift,
        MhField::NewShiftTarget,
    ] {
        session.set_field(field, parse_arg(args.next(), field)?);
    }

    let violations = collect_violations(&session.snapshot());
    let payload = session.prepare_payload();
    let view = session.view();
    session.close();

    let output = json!({
        "payload": payload,
        "view": view,
        "violations": violations,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
