//! 稳定的 DTO 与 API 响应契约。
//!
//! 仅描述与外部 HTTP 层交换的数据形状，不依赖领域模型。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 错误码（与领域错误分类一一对应）。
pub mod error_codes {
    pub const VALIDATION: &str = "VALIDATION";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const FAILED_PRECONDITION: &str = "FAILED_PRECONDITION";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INFRASTRUCTURE: &str = "INFRASTRUCTURE";
}

/// RFID 读取请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeituraRfidRequest {
    #[serde(alias = "rfidTag", alias = "rfid_tag")]
    pub rfid: String,
    #[serde(alias = "sensor_id")]
    pub sensor_id: i64,
    /// 信号强度（dBm），常规范围 [-120, -30]。
    #[serde(alias = "potencia_sinal")]
    pub potencia_sinal: f64,
}

/// 坐标返回结构。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordenadaDto {
    pub x: f64,
    pub y: f64,
}

/// 定位结果返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizacaoMotoDto {
    pub id: String,
    pub moto_id: i64,
    pub patio_id: i64,
    pub posicao: CoordenadaDto,
    pub status: String,
    pub fonte_dados: String,
    pub confiabilidade: f64,
    /// UTC 毫秒时间戳。
    pub timestamp: i64,
}
