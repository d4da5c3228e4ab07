//! 摩托车实体与状态。

use crate::error::{DomainError, DomainResult, ensure_not_blank};
use crate::evento::TipoEvento;
use std::fmt;

/// 摩托车状态。
///
/// 状态由定位事件驱动，实体本身不校验迁移合法性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotoStatus {
    Disponivel,
    Alugada,
    EmManutencao,
    /// 由摄像头等其他数据源产生。
    EmMovimento,
}

impl MotoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disponivel => "DISPONIVEL",
            Self::Alugada => "ALUGADA",
            Self::EmManutencao => "EM_MANUTENCAO",
            Self::EmMovimento => "EM_MOVIMENTO",
        }
    }

    /// 事件类型 → 新状态（全函数）。
    pub fn from_tipo_evento(tipo: TipoEvento) -> Self {
        match tipo {
            TipoEvento::Entrada => Self::Disponivel,
            TipoEvento::Saida => Self::Alugada,
            TipoEvento::Manutencao => Self::EmManutencao,
            TipoEvento::Parada => Self::Disponivel,
        }
    }
}

impl fmt::Display for MotoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MotoStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DISPONIVEL" => Ok(Self::Disponivel),
            "ALUGADA" => Ok(Self::Alugada),
            "EM_MANUTENCAO" => Ok(Self::EmManutencao),
            "EM_MOVIMENTO" => Ok(Self::EmMovimento),
            other => Err(DomainError::validation(format!("unknown moto status: {other}"))),
        }
    }
}

/// 被追踪的摩托车。
#[derive(Debug, Clone, PartialEq)]
pub struct Moto {
    id: i64,
    patio_id: i64,
    placa: String,
    modelo: String,
    ano: u16,
    rfid_tag: String,
    status: MotoStatus,
    ultima_manutencao_ms: Option<i64>,
    imagem_referencia: Option<String>,
}

impl Moto {
    /// 新车默认为 DISPONIVEL。
    pub fn new(
        id: i64,
        patio_id: i64,
        placa: impl Into<String>,
        modelo: impl Into<String>,
        ano: u16,
        rfid_tag: impl Into<String>,
    ) -> DomainResult<Self> {
        let placa = placa.into();
        let modelo = modelo.into();
        let rfid_tag = rfid_tag.into();
        ensure_not_blank("placa", &placa)?;
        ensure_not_blank("modelo", &modelo)?;
        ensure_not_blank("rfid_tag", &rfid_tag)?;
        if ano == 0 {
            return Err(DomainError::validation("ano must be > 0"));
        }
        Ok(Self {
            id,
            patio_id,
            placa,
            modelo,
            ano,
            rfid_tag,
            status: MotoStatus::Disponivel,
            ultima_manutencao_ms: None,
            imagem_referencia: None,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn patio_id(&self) -> i64 {
        self.patio_id
    }

    pub fn placa(&self) -> &str {
        &self.placa
    }

    pub fn modelo(&self) -> &str {
        &self.modelo
    }

    pub fn ano(&self) -> u16 {
        self.ano
    }

    pub fn rfid_tag(&self) -> &str {
        &self.rfid_tag
    }

    pub fn status(&self) -> MotoStatus {
        self.status
    }

    pub fn ultima_manutencao_ms(&self) -> Option<i64> {
        self.ultima_manutencao_ms
    }

    pub fn imagem_referencia(&self) -> Option<&str> {
        self.imagem_referencia.as_deref()
    }

    pub fn alterar_status(&mut self, status: MotoStatus) {
        self.status = status;
    }

    pub fn registrar_manutencao(&mut self, ts_ms: i64) {
        self.ultima_manutencao_ms = Some(ts_ms);
    }

    pub fn definir_imagem_referencia(&mut self, imagem: impl Into<String>) -> DomainResult<()> {
        let imagem = imagem.into();
        ensure_not_blank("imagem_referencia", &imagem)?;
        self.imagem_referencia = Some(imagem);
        Ok(())
    }
}
