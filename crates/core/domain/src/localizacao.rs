//! 摩托车位置记录（只追加，创建后不再修改）。

use crate::coordenada::Coordenada;
use crate::error::{DomainError, DomainResult, ensure_not_blank};
use crate::evento::FonteDados;
use crate::moto::MotoStatus;

/// 不可变的位置记录。
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizacaoMoto {
    id: String,
    moto_id: i64,
    patio_id: i64,
    posicao: Coordenada,
    timestamp_ms: i64,
    status: MotoStatus,
    fonte_dados: FonteDados,
    confiabilidade: f64,
}

impl LocalizacaoMoto {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        moto_id: i64,
        patio_id: i64,
        posicao: Coordenada,
        timestamp_ms: i64,
        status: MotoStatus,
        fonte_dados: FonteDados,
        confiabilidade: f64,
    ) -> DomainResult<Self> {
        let id = id.into();
        ensure_not_blank("id", &id)?;
        if !(0.0..=1.0).contains(&confiabilidade) {
            return Err(DomainError::validation(format!(
                "confiabilidade must be in [0, 1], got {confiabilidade}"
            )));
        }
        Ok(Self {
            id,
            moto_id,
            patio_id,
            posicao,
            timestamp_ms,
            status,
            fonte_dados,
            confiabilidade,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn moto_id(&self) -> i64 {
        self.moto_id
    }

    pub fn patio_id(&self) -> i64 {
        self.patio_id
    }

    pub fn posicao(&self) -> Coordenada {
        self.posicao
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn status(&self) -> MotoStatus {
        self.status
    }

    pub fn fonte_dados(&self) -> FonteDados {
        self.fonte_dados
    }

    pub fn confiabilidade(&self) -> f64 {
        self.confiabilidade
    }
}
