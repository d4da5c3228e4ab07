//! 摩托车生命周期事件（只追加）。

use crate::error::{DomainResult, ensure_not_blank};
use crate::zona::TipoZona;
use std::fmt;

/// 事件类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipoEvento {
    Entrada,
    Saida,
    Parada,
    Manutencao,
}

impl TipoEvento {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entrada => "ENTRADA",
            Self::Saida => "SAIDA",
            Self::Parada => "PARADA",
            Self::Manutencao => "MANUTENCAO",
        }
    }

    /// 区域类型 → 事件类型；未识别的区域归为 ENTRADA。
    pub fn from_tipo_zona(tipo: &TipoZona) -> Self {
        match tipo {
            TipoZona::Manutencao => Self::Manutencao,
            TipoZona::Estacionamento => Self::Parada,
            TipoZona::Entrada => Self::Entrada,
            TipoZona::Saida => Self::Saida,
            TipoZona::Outro(_) => Self::Entrada,
        }
    }
}

impl fmt::Display for TipoEvento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 事实来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FonteDados {
    Rfid,
    VisaoComputacional,
    Manual,
    Fusao,
}

impl FonteDados {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfid => "RFID",
            Self::VisaoComputacional => "VISAO_COMPUTACIONAL",
            Self::Manual => "MANUAL",
            Self::Fusao => "FUSAO",
        }
    }
}

impl fmt::Display for FonteDados {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 不可变的事件记录。
#[derive(Debug, Clone, PartialEq)]
pub struct EventoMoto {
    id: String,
    moto_id: i64,
    tipo: TipoEvento,
    timestamp_ms: i64,
    usuario_id: Option<i64>,
    sensor_id: Option<i64>,
    camera_id: Option<i64>,
    observacao: Option<String>,
    fonte_evento: FonteDados,
}

impl EventoMoto {
    pub fn new(
        id: impl Into<String>,
        moto_id: i64,
        tipo: TipoEvento,
        timestamp_ms: i64,
        fonte_evento: FonteDados,
    ) -> DomainResult<Self> {
        let id = id.into();
        ensure_not_blank("id", &id)?;
        Ok(Self {
            id,
            moto_id,
            tipo,
            timestamp_ms,
            usuario_id: None,
            sensor_id: None,
            camera_id: None,
            observacao: None,
            fonte_evento,
        })
    }

    pub fn with_usuario(mut self, usuario_id: i64) -> Self {
        self.usuario_id = Some(usuario_id);
        self
    }

    pub fn with_sensor(mut self, sensor_id: i64) -> Self {
        self.sensor_id = Some(sensor_id);
        self
    }

    pub fn with_camera(mut self, camera_id: i64) -> Self {
        self.camera_id = Some(camera_id);
        self
    }

    pub fn with_observacao(mut self, observacao: impl Into<String>) -> Self {
        let observacao = observacao.into();
        self.observacao = (!observacao.trim().is_empty()).then_some(observacao);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn moto_id(&self) -> i64 {
        self.moto_id
    }

    pub fn tipo(&self) -> TipoEvento {
        self.tipo
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn usuario_id(&self) -> Option<i64> {
        self.usuario_id
    }

    pub fn sensor_id(&self) -> Option<i64> {
        self.sensor_id
    }

    pub fn camera_id(&self) -> Option<i64> {
        self.camera_id
    }

    pub fn observacao(&self) -> Option<&str> {
        self.observacao.as_deref()
    }

    pub fn fonte_evento(&self) -> FonteDados {
        self.fonte_evento
    }
}
