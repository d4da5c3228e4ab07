use domain::{
    Coordenada, DomainError, EnderecoPatio, EventoMoto, FonteDados, LocalizacaoMoto, Moto,
    MotoStatus, Patio, TipoEvento, TipoZona,
};
use patio_storage::{
    EventoStore, InMemoryEventoStore, InMemoryLocalizacaoStore, InMemoryMotoStore,
    InMemoryPatioStore, LocalizacaoStore, MotoStore, PatioStore, SensorStore,
};

fn c(x: f64, y: f64) -> Coordenada {
    Coordenada::new(x, y).expect("coordenada")
}

fn patio_com_sensor() -> Patio {
    let mut patio = Patio::new(
        1,
        "Patio Leste",
        EnderecoPatio::new("Rua D, 9", "Recife", "PE", "Brasil").expect("endereco"),
        c(100.0, 100.0),
        None,
    )
    .expect("patio");
    patio
        .criar_zona(1, "Vagas", TipoZona::Estacionamento, c(0.0, 0.0), c(10.0, 10.0), "green")
        .expect("zona");
    patio
        .instalar_sensor_rfid(5, 1, "poste-1", c(5.0, 5.0), 3.0, 90.0)
        .expect("sensor");
    patio
}

#[tokio::test]
async fn moto_store_finds_by_tag_and_updates_status() {
    let store = InMemoryMotoStore::new();
    let moto = Moto::new(7, 1, "ABC1D23", "Pop 110i", 2024, "TAG-7").expect("moto");
    store.create_moto(moto.clone()).await.expect("create");

    let err = store
        .create_moto(Moto::new(8, 1, "XYZ9A88", "Pop 110i", 2024, "TAG-7").expect("moto"))
        .await
        .expect_err("duplicate tag");
    assert_eq!(err.to_string(), "rfid tag already assigned");

    let mut found = store
        .find_by_rfid_tag("TAG-7")
        .await
        .expect("query")
        .expect("moto");
    assert_eq!(found.id(), 7);
    assert!(store.find_by_rfid_tag("TAG-X").await.expect("query").is_none());

    found.alterar_status(MotoStatus::Alugada);
    store.update_status(&found).await.expect("update");
    assert_eq!(store.get(7).expect("moto").status(), MotoStatus::Alugada);
}

#[tokio::test]
async fn sensor_lookup_includes_zone_and_patio() {
    let store = InMemoryPatioStore::new();
    store.save_patio(patio_com_sensor()).await.expect("save");

    let contexto = store
        .find_sensor_with_zona_and_patio(5)
        .await
        .expect("query")
        .expect("sensor");
    assert_eq!(contexto.sensor.id(), 5);
    assert_eq!(contexto.zona.expect("zona").id(), 1);
    assert_eq!(contexto.patio.expect("patio").patio_id, 1);
    assert!(
        store
            .find_sensor_with_zona_and_patio(6)
            .await
            .expect("query")
            .is_none()
    );
}

#[tokio::test]
async fn record_ultima_leitura_updates_aggregate() {
    let store = InMemoryPatioStore::new();
    store.save_patio(patio_com_sensor()).await.expect("save");
    store.record_ultima_leitura(5, 42).await.expect("touch");
    let patio = store.find_patio(1).await.expect("query").expect("patio");
    assert_eq!(patio.sensor(5).expect("sensor").ultima_leitura_ms(), 42);
    let err = store.record_ultima_leitura(99, 42).await.expect_err("unknown sensor");
    assert!(err.domain_error().is_none());
}

#[tokio::test]
async fn patio_delete_requires_empty_aggregate() {
    let store = InMemoryPatioStore::new();
    store.save_patio(patio_com_sensor()).await.expect("save");
    let err = store.delete_patio(1).await.expect_err("owns children");
    assert!(matches!(
        err.domain_error(),
        Some(DomainError::FailedPrecondition(_))
    ));
    assert!(store.find_patio(1).await.expect("query").is_some());
    assert!(!store.delete_patio(2).await.expect("missing"));

    let vazio = Patio::new(
        3,
        "Vazio",
        EnderecoPatio::new("Rua E, 1", "Natal", "RN", "Brasil").expect("endereco"),
        c(10.0, 10.0),
        None,
    )
    .expect("patio");
    store.save_patio(vazio).await.expect("save");
    assert!(store.delete_patio(3).await.expect("delete"));
    assert!(store.find_patio(3).await.expect("query").is_none());
}

#[tokio::test]
async fn fact_logs_append_and_filter_by_moto() {
    let eventos = InMemoryEventoStore::new();
    let localizacoes = InMemoryLocalizacaoStore::new();
    for (id, moto_id, ts) in [("e2", 1, 20), ("e1", 1, 10), ("e3", 2, 5)] {
        let evento = EventoMoto::new(id, moto_id, TipoEvento::Entrada, ts, FonteDados::Rfid)
            .expect("evento")
            .with_sensor(5);
        eventos.append_evento(&evento).await.expect("append");
        let localizacao = LocalizacaoMoto::new(
            id,
            moto_id,
            1,
            c(1.0, 1.0),
            ts,
            MotoStatus::Disponivel,
            FonteDados::Rfid,
            0.8,
        )
        .expect("localizacao");
        localizacoes
            .append_localizacao(&localizacao)
            .await
            .expect("append");
    }
    assert_eq!(eventos.len(), 3);
    assert_eq!(localizacoes.len(), 3);

    let da_moto: Vec<String> = eventos
        .list_eventos_by_moto(1)
        .await
        .expect("list")
        .iter()
        .map(|evento| evento.id().to_string())
        .collect();
    assert_eq!(da_moto, vec!["e1", "e2"]);
    assert_eq!(
        localizacoes
            .list_localizacoes_by_moto(2)
            .await
            .expect("list")
            .len(),
        1
    );
}
