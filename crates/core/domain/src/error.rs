//! 领域错误类型
//!
//! 所有领域规则的违反都在修改状态之前同步返回：
//! - Validation：构造参数非法（非有限坐标、空名称、角度越界等）
//! - NotFound：引用的实体不存在
//! - FailedPrecondition：对象本身合法，但关系不满足当前操作
//! - Conflict：与现有状态冲突（区域重叠、重复激活等）

/// 领域错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::FailedPrecondition(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// 领域操作结果。
pub type DomainResult<T> = Result<T, DomainError>;

/// 校验文本非空（去除首尾空白后）。
pub(crate) fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// 校验安装高度：有限且非负。
pub(crate) fn ensure_altura(altura: f64) -> DomainResult<()> {
    if !altura.is_finite() || altura < 0.0 {
        return Err(DomainError::validation(format!(
            "altura must be >= 0, got {altura}"
        )));
    }
    Ok(())
}

/// 校验视角：区间 (0, 360]。
pub(crate) fn ensure_angulo_visao(angulo: f64) -> DomainResult<()> {
    if !angulo.is_finite() || angulo <= 0.0 || angulo > 360.0 {
        return Err(DomainError::validation(format!(
            "angulo_visao must be in (0, 360], got {angulo}"
        )));
    }
    Ok(())
}
