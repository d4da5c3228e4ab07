//! 演示院区与摩托车数据
//!
//! 布局（100 m × 60 m）：
//! - 入口区 [0,10]×[0,60]，读写器 1
//! - 停车区 [15,70]×[0,60]，读写器 2、3
//! - 维修区 [75,85]×[0,30]，读写器 4
//! - 出口区 [90,100]×[0,60]，读写器 5

use domain::{Coordenada, DomainError, EnderecoPatio, Moto, Patio, TipoZona};
use patio_storage::{MotoStore, PatioStore, StorageError};

pub const DEMO_PATIO_ID: i64 = 1;

/// 种子数据错误。
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

fn ponto(x: f64, y: f64) -> Result<Coordenada, DomainError> {
    Coordenada::new(x, y)
}

/// 构建演示院区聚合。
pub fn patio_demo() -> Result<Patio, DomainError> {
    let mut patio = Patio::new(
        DEMO_PATIO_ID,
        "Patio Demo",
        EnderecoPatio::new("Rua das Motos, 100", "Sao Paulo", "SP", "Brasil")?,
        ponto(100.0, 60.0)?,
        None,
    )?;

    let zonas = [
        (1, "Entrada", TipoZona::Entrada, (0.0, 0.0), (10.0, 60.0), "#2e7d32"),
        (2, "Vagas", TipoZona::Estacionamento, (15.0, 0.0), (70.0, 60.0), "#1565c0"),
        (3, "Oficina", TipoZona::Manutencao, (75.0, 0.0), (85.0, 30.0), "#ef6c00"),
        (4, "Saida", TipoZona::Saida, (90.0, 0.0), (100.0, 60.0), "#c62828"),
    ];
    for (id, nome, tipo, (x1, y1), (x2, y2), cor) in zonas {
        patio.criar_zona(id, nome, tipo, ponto(x1, y1)?, ponto(x2, y2)?, cor)?;
    }

    let sensores = [
        (1, 1, "portao-entrada", (5.0, 30.0)),
        (2, 2, "vagas-norte", (40.0, 45.0)),
        (3, 2, "vagas-sul", (40.0, 15.0)),
        (4, 3, "oficina", (80.0, 15.0)),
        (5, 4, "portao-saida", (95.0, 30.0)),
    ];
    for (id, zona_id, label, (x, y)) in sensores {
        patio.instalar_sensor_rfid(id, zona_id, label, ponto(x, y)?, 3.0, 90.0)?;
    }

    patio.adicionar_camera(1, "Camera Portao", ponto(8.0, 58.0)?, 4.5, 110.0, None)?;
    Ok(patio)
}

/// 演示摩托车（id, 车牌, 型号, 年份, 标签）。
const MOTOS: [(i64, &str, &str, u16, &str); 3] = [
    (1, "BRA2E19", "Mottu Sport 110i", 2024, "TAG-001"),
    (2, "RIO4F22", "Honda Pop 110i", 2023, "TAG-002"),
    (3, "SPX7H31", "Mottu-E", 2025, "TAG-003"),
];

/// 写入演示院区与摩托车，返回摩托车 id 列表。
pub async fn seed(
    patios: &dyn PatioStore,
    motos: &dyn MotoStore,
) -> Result<Vec<i64>, SeedError> {
    patios.save_patio(patio_demo()?).await?;
    let mut ids = Vec::with_capacity(MOTOS.len());
    for (id, placa, modelo, ano, tag) in MOTOS {
        let moto = motos
            .create_moto(Moto::new(id, DEMO_PATIO_ID, placa, modelo, ano, tag)?)
            .await?;
        ids.push(moto.id());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_layout_is_consistent() {
        let patio = patio_demo().expect("patio");
        assert_eq!(patio.zonas().count(), 4);
        assert_eq!(patio.sensores().count(), 5);
        assert_eq!(patio.cameras().count(), 1);
        for sensor in patio.sensores() {
            let zona = patio.zona(sensor.zona_patio_id()).expect("zona");
            assert!(zona.contem_posicao(&sensor.posicao_sensor()));
        }
    }
}
