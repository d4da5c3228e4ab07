//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - MotoStore: InMemoryMotoStore
//! - PatioStore + SensorStore: InMemoryPatioStore
//! - EventoStore: InMemoryEventoStore
//! - LocalizacaoStore: InMemoryLocalizacaoStore

pub mod evento;
pub mod localizacao;
pub mod moto;
pub mod patio;

pub use evento::*;
pub use localizacao::*;
pub use moto::*;
pub use patio::*;
