//! 院区 RFID 定位模拟器。
//!
//! 从标准输入逐行读取 JSON 格式的 RFID 读取，输出 ApiResponse 格式的定位结果；
//! 输入结束后输出院区摘要。

mod leitura;
mod seed;

use api_contract::ApiResponse;
use domain::ModeloPropagacao;
use patio_config::AppConfig;
use patio_locator::{LocalizadorConfig, LocalizadorRfid};
use patio_storage::{
    InMemoryEventoStore, InMemoryLocalizacaoStore, InMemoryMotoStore, InMemoryPatioStore,
};
use patio_telemetry::{init_tracing, metrics};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let patios = Arc::new(InMemoryPatioStore::new());
    let motos = Arc::new(InMemoryMotoStore::new());
    let eventos = Arc::new(InMemoryEventoStore::new());
    let localizacoes = Arc::new(InMemoryLocalizacaoStore::new());
    let moto_ids = seed::seed(patios.as_ref(), motos.as_ref()).await?;
    info!(
        target: "patio.sim",
        patio_id = seed::DEMO_PATIO_ID,
        motos = moto_ids.len(),
        "demo_patio_seeded"
    );

    let modelo = ModeloPropagacao::new(
        config.rfid_reference_dbm,
        config.rfid_max_range_dbm,
        config.rfid_max_range_meters,
    )?;
    let localizador = LocalizadorRfid::new(
        motos,
        patios.clone(),
        eventos.clone(),
        localizacoes.clone(),
        LocalizadorConfig {
            modelo,
            confiabilidade: config.rfid_confidence,
            rumo_seed: config.rfid_bearing_seed,
        },
    );

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let output = leitura::processar_linha(&localizador, line).await;
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    let resumo = leitura::resumir_patio(
        patios.as_ref(),
        localizacoes.as_ref(),
        &moto_ids,
        config.sensor_problem_threshold(),
    )
    .await?;
    if let Some(resumo) = resumo {
        let output = leitura::to_json_line(&ApiResponse::success(resumo));
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;

    let snapshot = metrics().snapshot();
    info!(
        target: "patio.sim",
        received = snapshot.readings_received,
        located = snapshot.readings_located,
        rejected = snapshot.readings_rejected,
        infrastructure_failures = snapshot.infrastructure_failures,
        eventos = eventos.len(),
        "simulation_finished"
    );
    Ok(())
}
