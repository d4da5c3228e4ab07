use domain::{Coordenada, DomainError, EnderecoPatio, ModeloPropagacao, Patio, TipoZona};
use std::time::Duration;

fn c(x: f64, y: f64) -> Coordenada {
    Coordenada::new(x, y).expect("coordenada")
}

fn patio_com_zona() -> Patio {
    let mut patio = Patio::new(
        1,
        "Patio Norte",
        EnderecoPatio::new("Av. B, 1", "Curitiba", "PR", "Brasil").expect("endereco"),
        c(50.0, 50.0),
        None,
    )
    .expect("patio");
    patio
        .criar_zona(10, "Entrada", TipoZona::Entrada, c(0.0, 0.0), c(10.0, 10.0), "blue")
        .expect("zona");
    patio
}

#[test]
fn install_validates_height_and_angle() {
    let mut patio = patio_com_zona();
    for (altura, angulo) in [(-0.1, 90.0), (2.0, 0.0), (2.0, 360.5), (f64::NAN, 90.0)] {
        let err = patio
            .instalar_sensor_rfid(1, 10, "portao", c(5.0, 5.0), altura, angulo)
            .expect_err("invalid sensor");
        assert!(matches!(err, DomainError::Validation(_)));
    }
    let sensor = patio
        .instalar_sensor_rfid(1, 10, "portao", c(5.0, 5.0), 0.0, 360.0)
        .expect("sensor");
    assert!(sensor.ativo());
    assert!(sensor.pode_ler_rfid());
    assert_eq!(sensor.patio_id(), 1);
    assert_eq!(sensor.zona_patio_id(), 10);
}

#[test]
fn activation_is_not_idempotent() {
    let mut patio = patio_com_zona();
    patio
        .instalar_sensor_rfid(1, 10, "portao", c(5.0, 5.0), 2.5, 120.0)
        .expect("sensor");

    let err = patio.ativar_sensor(1).expect_err("already active");
    assert!(matches!(err, DomainError::Conflict(_)));

    patio.desativar_sensor(1).expect("desativar");
    assert!(!patio.sensor(1).expect("sensor").pode_ler_rfid());
    let err = patio.desativar_sensor(1).expect_err("already inactive");
    assert!(matches!(err, DomainError::Conflict(_)));

    patio.ativar_sensor(1).expect("ativar");
    assert!(patio.sensor(1).expect("sensor").ativo());
}

#[test]
fn reading_on_inactive_sensor_fails() {
    let mut patio = patio_com_zona();
    patio
        .instalar_sensor_rfid(1, 10, "portao", c(5.0, 5.0), 2.5, 120.0)
        .expect("sensor");
    patio.desativar_sensor(1).expect("desativar");
    let err = patio
        .registrar_leitura_sensor(1, 1_000)
        .expect_err("inactive");
    assert!(matches!(err, DomainError::FailedPrecondition(_)));
}

#[test]
fn problem_detection_uses_threshold() {
    let mut patio = patio_com_zona();
    patio
        .instalar_sensor_rfid(1, 10, "portao", c(5.0, 5.0), 2.5, 120.0)
        .expect("sensor");
    patio.registrar_leitura_sensor(1, 1_000_000).expect("leitura");
    let sensor = patio.sensor(1).expect("sensor");
    assert_eq!(sensor.ultima_leitura_ms(), 1_000_000);

    let limiar = Duration::from_secs(60);
    assert!(!sensor.esta_com_problema_em(limiar, 1_060_000));
    assert!(sensor.esta_com_problema_em(limiar, 1_060_001));
    assert_eq!(patio.sensores_com_problema_em(limiar, 1_060_001).len(), 1);

    patio.desativar_sensor(1).expect("desativar");
    let sensor = patio.sensor(1).expect("sensor");
    assert!(!sensor.esta_com_problema_em(limiar, 9_000_000));
}

#[test]
fn fresh_sensor_is_not_flagged() {
    let mut patio = patio_com_zona();
    let sensor = patio
        .instalar_sensor_rfid(1, 10, "portao", c(5.0, 5.0), 2.5, 120.0)
        .expect("sensor");
    assert!(!sensor.esta_com_problema(Duration::from_secs(300)));
}

#[test]
fn range_and_position_updates() {
    let mut patio = patio_com_zona();
    patio
        .instalar_sensor_rfid(1, 10, "portao", c(0.0, 0.0), 2.5, 120.0)
        .expect("sensor");
    let sensor = patio.sensor(1).expect("sensor");
    assert_eq!(sensor.distancia_para(&c(3.0, 4.0)), 5.0);
    assert!(sensor.ponto_esta_no_alcance(&c(3.0, 4.0), 5.0));
    assert!(!sensor.ponto_esta_no_alcance(&c(3.0, 4.0), 4.99));

    patio
        .reposicionar_sensor(1, c(6.0, 8.0), Some(-1.0))
        .expect("mover");
    let sensor = patio.sensor(1).expect("sensor");
    assert_eq!(sensor.posicao_sensor(), c(6.0, 8.0));
    assert_eq!(sensor.altura(), 2.5);

    patio
        .reposicionar_sensor(1, c(6.0, 8.0), Some(4.0))
        .expect("mover");
    assert_eq!(patio.sensor(1).expect("sensor").altura(), 4.0);

    let err = patio
        .reposicionar_sensor(1, c(60.0, 8.0), None)
        .expect_err("out of bounds");
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn signal_model_maps_and_clamps() {
    let modelo = ModeloPropagacao::default();
    assert_eq!(modelo.estimar_distancia(-30.0), 0.0);
    assert_eq!(modelo.estimar_distancia(-90.0), 20.0);
    assert_eq!(modelo.estimar_distancia(-120.0), 20.0);
    assert_eq!(modelo.estimar_distancia(0.0), 0.0);
    assert!((modelo.estimar_distancia(-60.0) - 10.0).abs() < 1e-9);
}

#[test]
fn signal_model_is_monotonic() {
    let modelo = ModeloPropagacao::default();
    let mut anterior = modelo.estimar_distancia(10.0);
    let mut potencia = 10.0;
    while potencia >= -130.0 {
        let distancia = modelo.estimar_distancia(potencia);
        assert!(distancia >= anterior, "{potencia} dBm");
        assert!((0.0..=20.0).contains(&distancia));
        anterior = distancia;
        potencia -= 0.5;
    }
}

#[test]
fn signal_model_rejects_inverted_parameters() {
    let err = ModeloPropagacao::new(-90.0, -30.0, 20.0).expect_err("inverted");
    assert!(matches!(err, DomainError::Validation(_)));
    let err = ModeloPropagacao::new(-30.0, -90.0, 0.0).expect_err("range");
    assert!(matches!(err, DomainError::Validation(_)));
    let modelo = ModeloPropagacao::new(-40.0, -80.0, 10.0).expect("modelo");
    assert_eq!(modelo.estimar_distancia(-60.0), 5.0);
}

#[test]
fn signal_model_rejects_equal_endpoints() {
    let err = ModeloPropagacao::new(-60.0, -60.0, 20.0).expect_err("equal endpoints");
    assert!(matches!(err, DomainError::Validation(_)));
    let err = ModeloPropagacao::new(f64::NAN, -90.0, 20.0).expect_err("nan");
    assert!(matches!(err, DomainError::Validation(_)));

    let modelo = ModeloPropagacao::new(-25.0, -95.0, 30.0).expect("modelo");
    assert_eq!(modelo.potencia_referencia_dbm(), -25.0);
    assert_eq!(modelo.potencia_alcance_maximo_dbm(), -95.0);
    assert_eq!(modelo.alcance_maximo_m(), 30.0);
    assert!(modelo.estimar_distancia(-60.0).is_finite());
}
