//! 存储层错误类型
//!
//! 封装外部存储协作方的失败（连接、写入、一致性）。
//! 领域层不重试这些错误，由调用方决定是否重试。
//! 存储实现内部触发的领域规则错误原样保留，不降级为基础设施错误。

use domain::DomainError;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
    domain: Option<DomainError>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            domain: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 由领域规则引发时返回原始领域错误。
    pub fn domain_error(&self) -> Option<&DomainError> {
        self.domain.as_ref()
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<DomainError> for StorageError {
    fn from(err: DomainError) -> Self {
        Self {
            message: err.to_string(),
            domain: Some(err),
        }
    }
}
