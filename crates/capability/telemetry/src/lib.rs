//! 追踪、请求 ID 与读取计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 定位链路指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub readings_received: u64,
    pub readings_located: u64,
    pub readings_rejected: u64,
    pub infrastructure_failures: u64,
    pub status_update_failures: u64,
    pub sensor_touch_failures: u64,
    pub processing_latency_ms_total: u64,
    pub processing_latency_ms_count: u64,
}

/// 定位链路指标（进程内计数）。
pub struct TelemetryMetrics {
    readings_received: AtomicU64,
    readings_located: AtomicU64,
    readings_rejected: AtomicU64,
    infrastructure_failures: AtomicU64,
    status_update_failures: AtomicU64,
    sensor_touch_failures: AtomicU64,
    processing_latency_ms_total: AtomicU64,
    processing_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            readings_received: AtomicU64::new(0),
            readings_located: AtomicU64::new(0),
            readings_rejected: AtomicU64::new(0),
            infrastructure_failures: AtomicU64::new(0),
            status_update_failures: AtomicU64::new(0),
            sensor_touch_failures: AtomicU64::new(0),
            processing_latency_ms_total: AtomicU64::new(0),
            processing_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            readings_received: self.readings_received.load(Ordering::Relaxed),
            readings_located: self.readings_located.load(Ordering::Relaxed),
            readings_rejected: self.readings_rejected.load(Ordering::Relaxed),
            infrastructure_failures: self.infrastructure_failures.load(Ordering::Relaxed),
            status_update_failures: self.status_update_failures.load(Ordering::Relaxed),
            sensor_touch_failures: self.sensor_touch_failures.load(Ordering::Relaxed),
            processing_latency_ms_total: self
                .processing_latency_ms_total
                .load(Ordering::Relaxed),
            processing_latency_ms_count: self
                .processing_latency_ms_count
                .load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可通过 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录收到的 RFID 读取次数。
pub fn record_reading_received() {
    metrics().readings_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录成功定位次数。
pub fn record_reading_located() {
    metrics().readings_located.fetch_add(1, Ordering::Relaxed);
}

/// 记录因领域规则被拒绝的读取次数。
pub fn record_reading_rejected() {
    metrics().readings_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录存储协作方失败次数。
pub fn record_infrastructure_failure() {
    metrics()
        .infrastructure_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录尽力而为的状态更新失败次数。
pub fn record_status_update_failure() {
    metrics()
        .status_update_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录读写器最后读取时间刷新失败次数。
pub fn record_sensor_touch_failure() {
    metrics()
        .sensor_touch_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录单次读取处理耗时（毫秒）。
pub fn record_processing_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .processing_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .processing_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
