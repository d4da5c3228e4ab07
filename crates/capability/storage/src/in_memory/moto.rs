//! 摩托车内存存储实现
//!
//! 仅用于本地演示和测试。

use crate::error::StorageError;
use crate::traits::MotoStore;
use domain::Moto;
use std::collections::HashMap;
use std::sync::RwLock;

/// 摩托车内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储（按摩托车 id 索引）。
pub struct InMemoryMotoStore {
    motos: RwLock<HashMap<i64, Moto>>,
}

impl InMemoryMotoStore {
    pub fn new() -> Self {
        Self {
            motos: RwLock::new(HashMap::new()),
        }
    }

    /// 按 id 查找（用于测试断言）
    pub fn get(&self, moto_id: i64) -> Option<Moto> {
        self.motos
            .read()
            .ok()
            .and_then(|map| map.get(&moto_id).cloned())
    }
}

impl Default for InMemoryMotoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MotoStore for InMemoryMotoStore {
    async fn find_by_rfid_tag(&self, rfid_tag: &str) -> Result<Option<Moto>, StorageError> {
        let item = self
            .motos
            .read()
            .map_err(|_| StorageError::new("lock failed"))?
            .values()
            .find(|moto| moto.rfid_tag() == rfid_tag)
            .cloned();
        Ok(item)
    }

    async fn create_moto(&self, moto: Moto) -> Result<Moto, StorageError> {
        let mut map = self
            .motos
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&moto.id()) {
            return Err(StorageError::new("moto exists"));
        }
        if map.values().any(|item| item.rfid_tag() == moto.rfid_tag()) {
            return Err(StorageError::new("rfid tag already assigned"));
        }
        map.insert(moto.id(), moto.clone());
        Ok(moto)
    }

    async fn update_status(&self, moto: &Moto) -> Result<(), StorageError> {
        let mut map = self
            .motos
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let stored = map
            .get_mut(&moto.id())
            .ok_or_else(|| StorageError::new("moto not found"))?;
        stored.alterar_status(moto.status());
        Ok(())
    }
}
