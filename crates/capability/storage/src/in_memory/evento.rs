//! 事件日志内存实现
//!
//! 仅用于本地测试和演示，只追加、不去重。

use crate::error::StorageError;
use crate::traits::EventoStore;
use domain::EventoMoto;
use std::sync::RwLock;

/// 事件日志内存存储
pub struct InMemoryEventoStore {
    eventos: RwLock<Vec<EventoMoto>>,
}

impl InMemoryEventoStore {
    pub fn new() -> Self {
        Self {
            eventos: RwLock::new(Vec::new()),
        }
    }

    /// 获取当前累计的事件数量（用于测试）
    pub fn len(&self) -> usize {
        self.eventos.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryEventoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EventoStore for InMemoryEventoStore {
    async fn append_evento(&self, evento: &EventoMoto) -> Result<(), StorageError> {
        let mut eventos = self
            .eventos
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        eventos.push(evento.clone());
        Ok(())
    }

    async fn list_eventos_by_moto(&self, moto_id: i64) -> Result<Vec<EventoMoto>, StorageError> {
        let eventos = self
            .eventos
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut items: Vec<EventoMoto> = eventos
            .iter()
            .filter(|evento| evento.moto_id() == moto_id)
            .cloned()
            .collect();
        items.sort_by_key(|evento| evento.timestamp_ms());
        Ok(items)
    }
}
