//! RFID 读取定位引擎
//!
//! 一次读取（标签 + 读写器 + 信号强度）被转换为：
//! 1. 一条 EventoMoto（来源 RFID，记录读写器与信号强度）
//! 2. 一条 LocalizacaoMoto（估算位置 + 新状态 + 置信度）
//!
//! 事件与位置一起写入，任一失败即整体失败；摩托车状态更新
//! 和读写器最后读取时间刷新属于尽力而为，失败只记录日志与计数。

mod rumo;

pub use rumo::{RumoAleatorio, RumoFixo, RumoProvider};

use api_contract::{CoordenadaDto, LeituraRfidRequest, LocalizacaoMotoDto, error_codes};
use domain::{
    DomainError, EventoMoto, FonteDados, LocalizacaoMoto, ModeloPropagacao, MotoStatus,
    TipoEvento, now_epoch_ms,
};
use patio_storage::{EventoStore, LocalizacaoStore, MotoStore, SensorStore, StorageError};
use patio_telemetry::{
    new_request_ids, record_infrastructure_failure, record_processing_latency_ms,
    record_reading_located, record_reading_received, record_reading_rejected,
    record_sensor_touch_failure, record_status_update_failure,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, warn};

/// 定位处理错误。
#[derive(Debug, thiserror::Error)]
pub enum LocalizadorError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// 存储协作方失败，可由调用方重试。
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl LocalizadorError {
    /// 稳定错误码，用于 ApiResponse::error。
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::Validation(_)) => error_codes::VALIDATION,
            Self::Domain(DomainError::NotFound(_)) => error_codes::NOT_FOUND,
            Self::Domain(DomainError::FailedPrecondition(_)) => error_codes::FAILED_PRECONDITION,
            Self::Domain(DomainError::Conflict(_)) => error_codes::CONFLICT,
            Self::Infrastructure(_) => error_codes::INFRASTRUCTURE,
        }
    }
}

impl From<StorageError> for LocalizadorError {
    fn from(err: StorageError) -> Self {
        match err.domain_error() {
            Some(domain) => Self::Domain(domain.clone()),
            None => Self::Infrastructure(err.to_string()),
        }
    }
}

/// 定位参数。
#[derive(Debug, Clone)]
pub struct LocalizadorConfig {
    pub modelo: ModeloPropagacao,
    /// RFID 位置的固定置信度。
    pub confiabilidade: f64,
    /// 方位角随机种子；为空时使用系统熵。
    pub rumo_seed: Option<u64>,
}

impl Default for LocalizadorConfig {
    fn default() -> Self {
        Self {
            modelo: ModeloPropagacao::default(),
            confiabilidade: 0.8,
            rumo_seed: None,
        }
    }
}

/// 定位引擎。
///
/// 不持有跨读取的可变状态，每次读取都从存储重新取回摩托车与读写器。
#[derive(Clone)]
pub struct LocalizadorRfid {
    motos: Arc<dyn MotoStore>,
    sensores: Arc<dyn SensorStore>,
    eventos: Arc<dyn EventoStore>,
    localizacoes: Arc<dyn LocalizacaoStore>,
    rumo: Arc<dyn RumoProvider>,
    modelo: ModeloPropagacao,
    confiabilidade: f64,
}

impl LocalizadorRfid {
    pub fn new(
        motos: Arc<dyn MotoStore>,
        sensores: Arc<dyn SensorStore>,
        eventos: Arc<dyn EventoStore>,
        localizacoes: Arc<dyn LocalizacaoStore>,
        config: LocalizadorConfig,
    ) -> Self {
        Self {
            motos,
            sensores,
            eventos,
            localizacoes,
            rumo: Arc::new(RumoAleatorio::from_seed(config.rumo_seed)),
            modelo: config.modelo,
            confiabilidade: config.confiabilidade,
        }
    }

    /// 替换方位角来源。
    pub fn with_rumo(mut self, rumo: Arc<dyn RumoProvider>) -> Self {
        self.rumo = rumo;
        self
    }

    /// 处理一次 RFID 读取。
    pub async fn processar_leitura_rfid(
        &self,
        leitura: &LeituraRfidRequest,
    ) -> Result<LocalizacaoMotoDto, LocalizadorError> {
        let ids = new_request_ids();
        let span = tracing::info_span!(
            "rfid_reading",
            request_id = %ids.request_id,
            trace_id = %ids.trace_id,
            rfid = %leitura.rfid,
            sensor_id = leitura.sensor_id
        );

        async move {
            let started_at = Instant::now();
            record_reading_received();
            info!(
                target: "patio.locator",
                potencia_sinal = leitura.potencia_sinal,
                "rfid_reading_received"
            );

            let result = self.localizar(leitura).await;
            record_processing_latency_ms(
                u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX),
            );

            match &result {
                Ok(dto) => {
                    record_reading_located();
                    info!(
                        target: "patio.locator",
                        moto_id = dto.moto_id,
                        patio_id = dto.patio_id,
                        x = dto.posicao.x,
                        y = dto.posicao.y,
                        status = %dto.status,
                        "rfid_reading_located"
                    );
                }
                Err(LocalizadorError::Domain(err)) => {
                    record_reading_rejected();
                    info!(target: "patio.locator", error = %err, "rfid_reading_rejected");
                }
                Err(err) => {
                    record_infrastructure_failure();
                    warn!(target: "patio.locator", error = %err, "rfid_reading_rejected");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn localizar(
        &self,
        leitura: &LeituraRfidRequest,
    ) -> Result<LocalizacaoMotoDto, LocalizadorError> {
        validar_leitura(leitura)?;

        // 1. 按标签找车
        let mut moto = self
            .motos
            .find_by_rfid_tag(&leitura.rfid)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Moto com RFID {} não encontrada", leitura.rfid))
            })?;

        // 2. 读写器连同区域
        let contexto = self
            .sensores
            .find_sensor_with_zona_and_patio(leitura.sensor_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Sensor {} não encontrado", leitura.sensor_id))
            })?;
        let sensor = contexto.sensor;
        let zona = contexto.zona.ok_or_else(|| {
            DomainError::failed_precondition(format!(
                "Sensor {} não está associado a nenhuma zona",
                sensor.id()
            ))
        })?;
        if !sensor.pode_ler_rfid() {
            return Err(DomainError::failed_precondition(format!(
                "Sensor {} está inativo",
                sensor.id()
            ))
            .into());
        }

        // 3-4. 距离估算 + 方位角落点
        let distancia = self.modelo.estimar_distancia(leitura.potencia_sinal);
        let rumo = self.rumo.proximo_rumo();
        let posicao = sensor
            .posicao_sensor()
            .mover(distancia * rumo.cos(), distancia * rumo.sin())?;

        // 5-6. 区域类型 → 事件类型 → 状态
        let tipo_evento = TipoEvento::from_tipo_zona(zona.tipo_zona());
        let status = MotoStatus::from_tipo_evento(tipo_evento);

        // 7-8. 构造事实并一起写入
        let agora = now_epoch_ms();
        let evento = EventoMoto::new(
            uuid::Uuid::new_v4().to_string(),
            moto.id(),
            tipo_evento,
            agora,
            FonteDados::Rfid,
        )?
        .with_sensor(sensor.id())
        .with_observacao(format!(
            "Leitura RFID com potência {} dBm",
            leitura.potencia_sinal
        ));
        let localizacao = LocalizacaoMoto::new(
            uuid::Uuid::new_v4().to_string(),
            moto.id(),
            sensor.patio_id(),
            posicao,
            agora,
            status,
            FonteDados::Rfid,
            self.confiabilidade,
        )?;

        tokio::try_join!(
            self.eventos.append_evento(&evento),
            self.localizacoes.append_localizacao(&localizacao),
        )?;

        moto.alterar_status(status);
        if let Err(err) = self.motos.update_status(&moto).await {
            record_status_update_failure();
            warn!(
                target: "patio.locator",
                moto_id = moto.id(),
                status = %status,
                error = %err,
                "moto_status_update_failed"
            );
        }
        if let Err(err) = self.sensores.record_ultima_leitura(sensor.id(), agora).await {
            record_sensor_touch_failure();
            warn!(
                target: "patio.locator",
                sensor_id = sensor.id(),
                error = %err,
                "sensor_touch_failed"
            );
        }

        Ok(localizacao_to_dto(&localizacao))
    }
}

fn validar_leitura(leitura: &LeituraRfidRequest) -> Result<(), DomainError> {
    if leitura.rfid.trim().is_empty() {
        return Err(DomainError::validation("rfid tag must not be empty"));
    }
    if !leitura.potencia_sinal.is_finite() {
        return Err(DomainError::validation(format!(
            "potencia_sinal must be finite, got {}",
            leitura.potencia_sinal
        )));
    }
    Ok(())
}

/// 领域位置记录 → 返回结构。
pub fn localizacao_to_dto(localizacao: &LocalizacaoMoto) -> LocalizacaoMotoDto {
    let posicao = localizacao.posicao();
    LocalizacaoMotoDto {
        id: localizacao.id().to_string(),
        moto_id: localizacao.moto_id(),
        patio_id: localizacao.patio_id(),
        posicao: CoordenadaDto {
            x: posicao.x(),
            y: posicao.y(),
        },
        status: localizacao.status().as_str().to_string(),
        fonte_dados: localizacao.fonte_dados().as_str().to_string(),
        confiabilidade: localizacao.confiabilidade(),
        timestamp: localizacao.timestamp_ms(),
    }
}
