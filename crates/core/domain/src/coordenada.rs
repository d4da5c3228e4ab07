//! 二维坐标值对象。
//!
//! 坐标单位为米，原点位于院区左下角。值对象不可变，所有变换都返回新值。

use crate::error::{DomainError, DomainResult};
use std::fmt;

/// 坐标比较容差。
pub const EPSILON: f64 = 1e-4;

/// 不可变二维坐标（仅允许有限值）。
#[derive(Debug, Clone, Copy)]
pub struct Coordenada {
    x: f64,
    y: f64,
}

impl Coordenada {
    /// 构造坐标；NaN 或 ±Infinity 返回 Validation。
    pub fn new(x: f64, y: f64) -> DomainResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::validation(format!(
                "coordenada must be finite, got ({x}, {y})"
            )));
        }
        Ok(Self { x, y })
    }

    /// 由已知有限的分量构造（内部推导使用）。
    pub(crate) const fn from_finite(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn origem() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// 欧氏距离。
    pub fn distancia_euclidiana(&self, outra: &Coordenada) -> f64 {
        let dx = self.x - outra.x;
        let dy = self.y - outra.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 曼哈顿距离。
    pub fn distancia_manhattan(&self, outra: &Coordenada) -> f64 {
        (self.x - outra.x).abs() + (self.y - outra.y).abs()
    }

    /// 判断是否位于两个对角点围成的矩形内（边界与角点算在内）。
    pub fn esta_dentro_do_retangulo(&self, canto1: &Coordenada, canto2: &Coordenada) -> bool {
        let (min_x, max_x) = ordenar(canto1.x, canto2.x);
        let (min_y, max_y) = ordenar(canto1.y, canto2.y);
        self.x >= min_x && self.x <= max_x && self.y >= min_y && self.y <= max_y
    }

    /// 平移后返回新坐标，结果溢出为非有限值时返回 Validation。
    pub fn mover(&self, delta_x: f64, delta_y: f64) -> DomainResult<Coordenada> {
        Coordenada::new(self.x + delta_x, self.y + delta_y)
    }

    /// 两点中点。
    pub fn ponto_medio(a: &Coordenada, b: &Coordenada) -> Coordenada {
        Coordenada {
            x: a.x / 2.0 + b.x / 2.0,
            y: a.y / 2.0 + b.y / 2.0,
        }
    }
}

impl PartialEq for Coordenada {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Default for Coordenada {
    fn default() -> Self {
        Self::origem()
    }
}

impl fmt::Display for Coordenada {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub(crate) fn ordenar(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
