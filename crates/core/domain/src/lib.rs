//! 院区空间领域模型。
//!
//! 纯同步、无 I/O 的领域层：坐标几何、区域、RFID 读写器、摄像头、
//! 摩托车状态、院区聚合根以及两类只追加的历史事实（事件 / 位置）。

pub mod camera;
pub mod coordenada;
pub mod error;
pub mod evento;
pub mod localizacao;
pub mod moto;
pub mod patio;
pub mod sensor;
pub mod zona;

pub use camera::Camera;
pub use coordenada::{Coordenada, EPSILON};
pub use error::{DomainError, DomainResult};
pub use evento::{EventoMoto, FonteDados, TipoEvento};
pub use localizacao::LocalizacaoMoto;
pub use moto::{Moto, MotoStatus};
pub use patio::{EnderecoPatio, Patio};
pub use sensor::{ModeloPropagacao, SensorRfid};
pub use zona::{TipoZona, ZonaPatio};

/// 当前 UTC 时间（Unix 毫秒）。
pub fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
