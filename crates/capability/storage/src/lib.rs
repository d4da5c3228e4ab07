//! # Patio Storage 模块
//!
//! 定位核心所依赖的存储协作方抽象，以及用于测试和演示的内存实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：摩托车、读写器、院区、事件、位置的异步 Trait
//! 2. **查询模型层** (`models.rs`)：读写器连同区域/院区的联合查询结果
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **实现层** (`in_memory/`)：`RwLock` 保护的内存实现
//!
//! 关系型/文档型数据库适配器不在本工作区内，只需实现同一组 Trait。
//!
//! ## 并发说明
//!
//! - 每次读取都重新从存储解析摩托车与读写器，核心不持有跨请求的可变状态
//! - 对同一标签的并发读取不做串行化，状态更新以最后写入为准
//! - 追加接口不做幂等去重
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use patio_storage::{InMemoryMotoStore, MotoStore};
//! use domain::Moto;
//!
//! let store = InMemoryMotoStore::new();
//! store.create_moto(Moto::new(1, 1, "ABC1D23", "Pop 110i", 2024, "TAG-1")?).await?;
//! let moto = store.find_by_rfid_tag("TAG-1").await?;
//! ```

pub mod error;
pub mod in_memory;
pub mod models;
pub mod traits;

pub use error::*;
pub use models::*;
pub use traits::*;

pub use in_memory::{
    InMemoryEventoStore, InMemoryLocalizacaoStore, InMemoryMotoStore, InMemoryPatioStore,
};
