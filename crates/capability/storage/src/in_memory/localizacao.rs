//! 位置日志内存实现
//!
//! 仅用于本地测试和演示，只追加、不去重。

use crate::error::StorageError;
use crate::traits::LocalizacaoStore;
use domain::LocalizacaoMoto;
use std::sync::RwLock;

/// 位置日志内存存储
pub struct InMemoryLocalizacaoStore {
    localizacoes: RwLock<Vec<LocalizacaoMoto>>,
}

impl InMemoryLocalizacaoStore {
    pub fn new() -> Self {
        Self {
            localizacoes: RwLock::new(Vec::new()),
        }
    }

    /// 获取当前累计的位置记录数量（用于测试）
    pub fn len(&self) -> usize {
        self.localizacoes.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryLocalizacaoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LocalizacaoStore for InMemoryLocalizacaoStore {
    async fn append_localizacao(&self, localizacao: &LocalizacaoMoto) -> Result<(), StorageError> {
        let mut localizacoes = self
            .localizacoes
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        localizacoes.push(localizacao.clone());
        Ok(())
    }

    async fn list_localizacoes_by_moto(
        &self,
        moto_id: i64,
    ) -> Result<Vec<LocalizacaoMoto>, StorageError> {
        let localizacoes = self
            .localizacoes
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut items: Vec<LocalizacaoMoto> = localizacoes
            .iter()
            .filter(|localizacao| localizacao.moto_id() == moto_id)
            .cloned()
            .collect();
        items.sort_by_key(|localizacao| localizacao.timestamp_ms());
        Ok(items)
    }
}
