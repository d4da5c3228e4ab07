//! 院区内存存储实现
//!
//! 仅用于本地演示和测试。整个聚合按院区 id 存放，
//! 读写器查询通过扫描各院区完成（读写器 id 需全局唯一）。

use crate::error::StorageError;
use crate::models::{PatioResumo, SensorLeituraContexto};
use crate::traits::{PatioStore, SensorStore};
use domain::Patio;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// 院区内存存储
pub struct InMemoryPatioStore {
    patios: RwLock<BTreeMap<i64, Patio>>,
}

impl InMemoryPatioStore {
    pub fn new() -> Self {
        Self {
            patios: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryPatioStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PatioStore for InMemoryPatioStore {
    async fn save_patio(&self, patio: Patio) -> Result<(), StorageError> {
        let mut map = self
            .patios
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert(patio.id(), patio);
        Ok(())
    }

    async fn find_patio(&self, patio_id: i64) -> Result<Option<Patio>, StorageError> {
        let item = self
            .patios
            .read()
            .map_err(|_| StorageError::new("lock failed"))?
            .get(&patio_id)
            .cloned();
        Ok(item)
    }

    async fn delete_patio(&self, patio_id: i64) -> Result<bool, StorageError> {
        let mut map = self
            .patios
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get(&patio_id) {
            Some(patio) => {
                patio.garantir_remocao_permitida()?;
                map.remove(&patio_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl SensorStore for InMemoryPatioStore {
    async fn find_sensor_with_zona_and_patio(
        &self,
        sensor_id: i64,
    ) -> Result<Option<SensorLeituraContexto>, StorageError> {
        let map = self
            .patios
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let contexto = map.values().find_map(|patio| {
            let sensor = patio.sensor(sensor_id)?;
            Some(SensorLeituraContexto {
                sensor: sensor.clone(),
                zona: patio.zona(sensor.zona_patio_id()).cloned(),
                patio: Some(PatioResumo::from(patio)),
            })
        });
        Ok(contexto)
    }

    async fn record_ultima_leitura(&self, sensor_id: i64, ts_ms: i64) -> Result<(), StorageError> {
        let mut map = self
            .patios
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let patio = map
            .values_mut()
            .find(|patio| patio.sensor(sensor_id).is_some())
            .ok_or_else(|| StorageError::new("sensor not found"))?;
        patio.registrar_leitura_sensor(sensor_id, ts_ms)?;
        Ok(())
    }
}
