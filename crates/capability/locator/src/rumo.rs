//! 方位角来源。
//!
//! 单读写器只能估算距离，方位角目前为均匀随机值（模拟桩）。
//! 通过 trait 注入，测试和回放可以固定方位或固定随机种子。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::sync::Mutex;

/// 方位角提供者，返回 [0, 2π) 内的弧度。
pub trait RumoProvider: Send + Sync {
    fn proximo_rumo(&self) -> f64;
}

/// 均匀随机方位角。
pub struct RumoAleatorio {
    rng: Mutex<StdRng>,
}

impl RumoAleatorio {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 固定种子，序列可复现。
    pub fn com_semente(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::com_semente(seed),
            None => Self::new(),
        }
    }
}

impl Default for RumoAleatorio {
    fn default() -> Self {
        Self::new()
    }
}

impl RumoProvider for RumoAleatorio {
    fn proximo_rumo(&self) -> f64 {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(0.0..TAU)
    }
}

/// 固定方位角（弧度）。
#[derive(Debug, Clone, Copy)]
pub struct RumoFixo(pub f64);

impl RumoProvider for RumoFixo {
    fn proximo_rumo(&self) -> f64 {
        self.0.rem_euclid(TAU)
    }
}
