//! 存储接口 Trait 定义
//!
//! 定位核心依赖的外部协作方：
//! - MotoStore：摩托车查询与状态更新
//! - SensorStore：读写器（连同区域、院区）查询
//! - PatioStore：院区聚合读写
//! - EventoStore：事件日志（只追加）
//! - LocalizacaoStore：位置日志（只追加）
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 追加接口不做去重
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::SensorLeituraContexto;
use async_trait::async_trait;
use domain::{EventoMoto, LocalizacaoMoto, Moto, Patio};

/// 摩托车存储接口
#[async_trait]
pub trait MotoStore: Send + Sync {
    /// 根据 RFID 标签查找摩托车
    async fn find_by_rfid_tag(&self, rfid_tag: &str) -> Result<Option<Moto>, StorageError>;

    /// 新增摩托车（RFID 标签唯一）
    async fn create_moto(&self, moto: Moto) -> Result<Moto, StorageError>;

    /// 持久化摩托车当前状态
    async fn update_status(&self, moto: &Moto) -> Result<(), StorageError>;
}

/// 读写器存储接口
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// 查找读写器，并一并带出其区域与院区
    async fn find_sensor_with_zona_and_patio(
        &self,
        sensor_id: i64,
    ) -> Result<Option<SensorLeituraContexto>, StorageError>;

    /// 刷新读写器最后读取时间
    async fn record_ultima_leitura(&self, sensor_id: i64, ts_ms: i64) -> Result<(), StorageError>;
}

/// 院区存储接口
#[async_trait]
pub trait PatioStore: Send + Sync {
    /// 新增或整体替换院区聚合
    async fn save_patio(&self, patio: Patio) -> Result<(), StorageError>;

    /// 查找院区
    async fn find_patio(&self, patio_id: i64) -> Result<Option<Patio>, StorageError>;

    /// 删除院区（仍拥有子实体时拒绝）
    async fn delete_patio(&self, patio_id: i64) -> Result<bool, StorageError>;
}

/// 事件日志接口
#[async_trait]
pub trait EventoStore: Send + Sync {
    async fn append_evento(&self, evento: &EventoMoto) -> Result<(), StorageError>;

    async fn list_eventos_by_moto(&self, moto_id: i64) -> Result<Vec<EventoMoto>, StorageError>;
}

/// 位置日志接口
#[async_trait]
pub trait LocalizacaoStore: Send + Sync {
    async fn append_localizacao(&self, localizacao: &LocalizacaoMoto) -> Result<(), StorageError>;

    async fn list_localizacoes_by_moto(
        &self,
        moto_id: i64,
    ) -> Result<Vec<LocalizacaoMoto>, StorageError>;
}
