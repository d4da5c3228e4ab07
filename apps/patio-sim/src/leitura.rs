//! 逐行处理 RFID 读取并生成院区摘要。

use crate::seed::DEMO_PATIO_ID;
use api_contract::{ApiResponse, LeituraRfidRequest, LocalizacaoMotoDto, error_codes};
use domain::now_epoch_ms;
use patio_locator::LocalizadorRfid;
use patio_storage::{LocalizacaoStore, PatioStore, StorageError};
use serde::Serialize;
use std::time::Duration;

/// 处理一行 JSON 读取，返回序列化后的响应。
pub async fn processar_linha(localizador: &LocalizadorRfid, linha: &str) -> String {
    let response = match serde_json::from_str::<LeituraRfidRequest>(linha) {
        Ok(leitura) => match localizador.processar_leitura_rfid(&leitura).await {
            Ok(dto) => ApiResponse::success(dto),
            Err(err) => ApiResponse::<LocalizacaoMotoDto>::error(err.error_code(), err.to_string()),
        },
        Err(err) => ApiResponse::error(error_codes::VALIDATION, format!("invalid reading: {err}")),
    };
    to_json_line(&response)
}

/// 序列化为单行 JSON；失败时退化为基础设施错误响应。
pub fn to_json_line<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        let fallback =
            ApiResponse::<()>::error(error_codes::INFRASTRUCTURE, format!("encode failed: {err}"));
        serde_json::to_string(&fallback).unwrap_or_default()
    })
}

/// 院区运行摘要。
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumoPatio {
    pub patio_id: i64,
    pub localizacoes: usize,
    pub motos_disponiveis: usize,
    pub motos_estacionadas: usize,
    pub taxa_ocupacao: f64,
    pub sensores_com_problema: Vec<i64>,
}

/// 将位置日志回放到院区聚合上，计算占用率与静默读写器。
pub async fn resumir_patio(
    patios: &dyn PatioStore,
    localizacoes: &dyn LocalizacaoStore,
    moto_ids: &[i64],
    limiar_problema: Duration,
) -> Result<Option<ResumoPatio>, StorageError> {
    let Some(mut patio) = patios.find_patio(DEMO_PATIO_ID).await? else {
        return Ok(None);
    };
    for moto_id in moto_ids {
        for localizacao in localizacoes.list_localizacoes_by_moto(*moto_id).await? {
            if localizacao.patio_id() == patio.id() {
                patio.registrar_localizacao(localizacao)?;
            }
        }
    }
    let sensores_com_problema = patio
        .sensores_com_problema_em(limiar_problema, now_epoch_ms())
        .into_iter()
        .map(|sensor| sensor.id())
        .collect();
    Ok(Some(ResumoPatio {
        patio_id: patio.id(),
        localizacoes: patio.localizacoes().len(),
        motos_disponiveis: patio.obter_total_motos_disponiveis(),
        motos_estacionadas: patio.obter_total_motos_estacionadas(),
        taxa_ocupacao: patio.calcular_taxa_ocupacao(),
        sensores_com_problema,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed;
    use patio_locator::{LocalizadorConfig, RumoFixo};
    use patio_storage::{
        InMemoryEventoStore, InMemoryLocalizacaoStore, InMemoryMotoStore, InMemoryPatioStore,
    };
    use std::sync::Arc;

    struct Sim {
        patios: Arc<InMemoryPatioStore>,
        localizacoes: Arc<InMemoryLocalizacaoStore>,
        moto_ids: Vec<i64>,
        localizador: LocalizadorRfid,
    }

    async fn sim() -> Sim {
        let patios = Arc::new(InMemoryPatioStore::new());
        let motos = Arc::new(InMemoryMotoStore::new());
        let localizacoes = Arc::new(InMemoryLocalizacaoStore::new());
        let moto_ids = seed(patios.as_ref(), motos.as_ref()).await.expect("seed");
        let localizador = LocalizadorRfid::new(
            motos,
            patios.clone(),
            Arc::new(InMemoryEventoStore::new()),
            localizacoes.clone(),
            LocalizadorConfig::default(),
        )
        .with_rumo(Arc::new(RumoFixo(0.0)));
        Sim {
            patios,
            localizacoes,
            moto_ids,
            localizador,
        }
    }

    #[tokio::test]
    async fn line_outputs_follow_api_response_shape() {
        let sim = sim().await;

        let ok = processar_linha(
            &sim.localizador,
            r#"{"rfidTag":"TAG-001","sensorId":2,"potenciaSinal":-30}"#,
        )
        .await;
        let value: serde_json::Value = serde_json::from_str(&ok).expect("json");
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["motoId"], 1);
        assert_eq!(value["data"]["status"], "DISPONIVEL");

        let missing = processar_linha(
            &sim.localizador,
            r#"{"rfid":"TAG-999","sensorId":2,"potenciaSinal":-30}"#,
        )
        .await;
        let value: serde_json::Value = serde_json::from_str(&missing).expect("json");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], error_codes::NOT_FOUND);

        let garbage = processar_linha(&sim.localizador, "not json").await;
        let value: serde_json::Value = serde_json::from_str(&garbage).expect("json");
        assert_eq!(value["error"]["code"], error_codes::VALIDATION);
    }

    #[tokio::test]
    async fn summary_counts_parked_motos() {
        let sim = sim().await;
        for linha in [
            r#"{"rfid":"TAG-001","sensorId":2,"potenciaSinal":-30}"#,
            r#"{"rfid":"TAG-002","sensorId":3,"potenciaSinal":-30}"#,
            r#"{"rfid":"TAG-003","sensorId":4,"potenciaSinal":-30}"#,
        ] {
            processar_linha(&sim.localizador, linha).await;
        }

        let resumo = resumir_patio(
            sim.patios.as_ref(),
            sim.localizacoes.as_ref(),
            &sim.moto_ids,
            Duration::from_secs(300),
        )
        .await
        .expect("resumo")
        .expect("patio");

        assert_eq!(resumo.localizacoes, 3);
        assert_eq!(resumo.motos_disponiveis, 2);
        assert_eq!(resumo.motos_estacionadas, 2);
        assert_eq!(resumo.taxa_ocupacao, 2.0);
        assert!(resumo.sensores_com_problema.is_empty());
    }
}
