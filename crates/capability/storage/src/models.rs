//! 存储查询模型
//!
//! - SensorLeituraContexto：读写器连同其区域与院区摘要（定位引擎一次取回）
//! - PatioResumo：院区摘要，避免复制整个聚合

use domain::{Coordenada, Patio, SensorRfid, ZonaPatio};

/// 院区摘要。
#[derive(Debug, Clone, PartialEq)]
pub struct PatioResumo {
    pub patio_id: i64,
    pub nome: String,
    pub dimensoes: Coordenada,
}

impl From<&Patio> for PatioResumo {
    fn from(patio: &Patio) -> Self {
        Self {
            patio_id: patio.id(),
            nome: patio.nome().to_string(),
            dimensoes: patio.dimensoes(),
        }
    }
}

/// 读写器及其关联的区域和院区。
///
/// `zona` 为空表示读写器引用了不存在的区域（由调用方决定如何处理）。
#[derive(Debug, Clone)]
pub struct SensorLeituraContexto {
    pub sensor: SensorRfid,
    pub zona: Option<ZonaPatio>,
    pub patio: Option<PatioResumo>,
}
