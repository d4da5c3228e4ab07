use api_contract::{LeituraRfidRequest, error_codes};
use domain::{
    Coordenada, DomainError, EnderecoPatio, Moto, MotoStatus, Patio, TipoEvento, TipoZona,
};
use patio_locator::{LocalizadorConfig, LocalizadorError, LocalizadorRfid};
use patio_storage::{
    EventoStore, InMemoryEventoStore, InMemoryLocalizacaoStore, InMemoryMotoStore,
    InMemoryPatioStore, MotoStore, PatioStore,
};
use std::sync::Arc;

fn c(x: f64, y: f64) -> Coordenada {
    Coordenada::new(x, y).expect("coordenada")
}

struct Cenario {
    motos: Arc<InMemoryMotoStore>,
    patios: Arc<InMemoryPatioStore>,
    eventos: Arc<InMemoryEventoStore>,
    localizacoes: Arc<InMemoryLocalizacaoStore>,
    localizador: LocalizadorRfid,
}

async fn cenario(tipo: TipoZona) -> Cenario {
    let mut patio = Patio::new(
        1,
        "Patio Centro",
        EnderecoPatio::new("Av. Paulista, 1000", "Sao Paulo", "SP", "Brasil").expect("endereco"),
        c(100.0, 100.0),
        None,
    )
    .expect("patio");
    patio
        .criar_zona(1, "Zona A", tipo, c(0.0, 0.0), c(10.0, 10.0), "green")
        .expect("zona");
    patio
        .instalar_sensor_rfid(1, 1, "centro", c(5.0, 5.0), 3.0, 120.0)
        .expect("sensor");

    let motos = Arc::new(InMemoryMotoStore::new());
    motos
        .create_moto(Moto::new(42, 1, "BRA2E19", "Mottu Sport", 2024, "TAG-42").expect("moto"))
        .await
        .expect("create moto");
    let patios = Arc::new(InMemoryPatioStore::new());
    patios.save_patio(patio).await.expect("save patio");
    let eventos = Arc::new(InMemoryEventoStore::new());
    let localizacoes = Arc::new(InMemoryLocalizacaoStore::new());
    let localizador = LocalizadorRfid::new(
        motos.clone(),
        patios.clone(),
        eventos.clone(),
        localizacoes.clone(),
        LocalizadorConfig {
            rumo_seed: Some(7),
            ..LocalizadorConfig::default()
        },
    );

    Cenario {
        motos,
        patios,
        eventos,
        localizacoes,
        localizador,
    }
}

fn leitura(rfid: &str, potencia_sinal: f64) -> LeituraRfidRequest {
    LeituraRfidRequest {
        rfid: rfid.to_string(),
        sensor_id: 1,
        potencia_sinal,
    }
}

#[tokio::test]
async fn parking_zone_reading_at_reference_power_lands_on_sensor() {
    let cenario = cenario(TipoZona::Estacionamento).await;

    let dto = cenario
        .localizador
        .processar_leitura_rfid(&leitura("TAG-42", -30.0))
        .await
        .expect("located");

    assert_eq!(dto.status, "DISPONIVEL");
    assert_eq!(dto.confiabilidade, 0.8);
    assert_eq!(dto.moto_id, 42);
    assert!((dto.posicao.x - 5.0).abs() < 1e-9);
    assert!((dto.posicao.y - 5.0).abs() < 1e-9);

    let eventos = cenario.eventos.list_eventos_by_moto(42).await.expect("eventos");
    assert_eq!(eventos.len(), 1);
    assert_eq!(eventos[0].tipo(), TipoEvento::Parada);

    let patio = cenario.patios.find_patio(1).await.expect("find").expect("patio");
    assert_eq!(
        patio.sensor(1).expect("sensor").ultima_leitura_ms(),
        dto.timestamp
    );
}

#[tokio::test]
async fn exit_zone_reading_rents_the_moto() {
    let cenario = cenario(TipoZona::from("ZONA_DE_SAIDA")).await;

    let dto = cenario
        .localizador
        .processar_leitura_rfid(&leitura("TAG-42", -45.0))
        .await
        .expect("located");

    assert_eq!(dto.status, "ALUGADA");
    let eventos = cenario.eventos.list_eventos_by_moto(42).await.expect("eventos");
    assert_eq!(eventos[0].tipo(), TipoEvento::Saida);
    assert_eq!(
        cenario.motos.get(42).expect("moto").status(),
        MotoStatus::Alugada
    );

    // -45 dBm → 5 m
    let distancia = ((dto.posicao.x - 5.0).powi(2) + (dto.posicao.y - 5.0).powi(2)).sqrt();
    assert!((distancia - 5.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_tag_is_not_found_and_writes_nothing() {
    let cenario = cenario(TipoZona::Estacionamento).await;

    let err = cenario
        .localizador
        .processar_leitura_rfid(&leitura("TAG-404", -40.0))
        .await
        .expect_err("unknown tag");

    match &err {
        LocalizadorError::Domain(DomainError::NotFound(message)) => {
            assert_eq!(message, "Moto com RFID TAG-404 não encontrada");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.error_code(), error_codes::NOT_FOUND);
    assert!(cenario.eventos.is_empty());
    assert!(cenario.localizacoes.is_empty());
}

#[tokio::test]
async fn unknown_sensor_is_not_found() {
    let cenario = cenario(TipoZona::Entrada).await;
    let request = LeituraRfidRequest {
        rfid: "TAG-42".to_string(),
        sensor_id: 99,
        potencia_sinal: -40.0,
    };

    let err = cenario
        .localizador
        .processar_leitura_rfid(&request)
        .await
        .expect_err("unknown sensor");
    assert_eq!(err.error_code(), error_codes::NOT_FOUND);
    assert!(cenario.eventos.is_empty());
}

#[tokio::test]
async fn overlapping_zone_creation_conflicts() {
    let mut patio = Patio::new(
        2,
        "Patio Sul",
        EnderecoPatio::new("Rua B, 20", "Curitiba", "PR", "Brasil").expect("endereco"),
        c(100.0, 100.0),
        None,
    )
    .expect("patio");
    patio
        .criar_zona(1, "A", TipoZona::Estacionamento, c(0.0, 0.0), c(10.0, 10.0), "red")
        .expect("first zone");

    let err = patio
        .criar_zona(2, "B", TipoZona::Estacionamento, c(0.0, 0.0), c(10.0, 10.0), "red")
        .expect_err("overlap");
    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(patio.zonas().count(), 1);
}

#[tokio::test]
async fn seeded_engines_place_readings_identically() {
    let a = cenario(TipoZona::Estacionamento).await;
    let b = cenario(TipoZona::Estacionamento).await;

    let da = a
        .localizador
        .processar_leitura_rfid(&leitura("TAG-42", -70.0))
        .await
        .expect("a");
    let db = b
        .localizador
        .processar_leitura_rfid(&leitura("TAG-42", -70.0))
        .await
        .expect("b");
    assert_eq!(da.posicao, db.posicao);
    assert_ne!(da.id, db.id);
}
