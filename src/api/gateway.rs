// ==========================================
// 产线工时目标系统 - MH 配置外部接口
// ==========================================
// 职责: 定义 MH 配置资源的 create/update/get 协作接口
// 说明: 传输、持久化与读取均由实现方负责；本库只保证载荷中派生字段正确
// ==========================================

use crate::domain::payload::{MhConfigPayload, MhConfigRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// 外部接口错误
///
/// 服务端返回的文本原样保留
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// 字段级拒绝
    #[error("{}", join_field_errors(.0))]
    FieldErrors(BTreeMap<String, Vec<String>>),

    /// 消息级拒绝
    #[error("{0}")]
    Message(String),

    /// 接口不可达
    #[error("接口不可用: {0}")]
    Unavailable(String),
}

fn join_field_errors(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
        .collect::<Vec<_>>()
        .join("\n")
}

// ==========================================
// MhConfigGateway Trait
// ==========================================
#[async_trait]
pub trait MhConfigGateway: Send + Sync {
    /// 新建配置，返回服务端分配 id 后的记录
    async fn create(&self, payload: &MhConfigPayload) -> Result<MhConfigRecord, GatewayError>;

    /// 更新配置
    async fn update(
        &self,
        id: &str,
        payload: &MhConfigPayload,
    ) -> Result<MhConfigRecord, GatewayError>;

    /// 读取配置（不存在返回 None）
    async fn get(&self, id: &str) -> Result<Option<MhConfigRecord>, GatewayError>;
}
