use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use std::time::Duration;

/// 指标收集器
pub struct MetricsCollector {
    counters: HashMap<String, IntCounterVec>,
    histograms: HashMap<String, HistogramVec>,
}

impl MetricsCollector {
    fn new() -> Self {
        Self {
            counters: HashMap::new(),
            histograms: HashMap::new(),
        }
    }

    fn register_counter_vec(
        &mut self,
        registry: &Registry,
        name: &str,
        help: &str,
        labels: &[&str],
    ) -> Result<()> {
        let counter = IntCounterVec::new(Opts::new(name, help), labels)?;
        registry.register(Box::new(counter.clone()))?;
        self.counters.insert(name.to_string(), counter);
        Ok(())
    }

    fn register_histogram_vec(
        &mut self,
        registry: &Registry,
        name: &str,
        help: &str,
        labels: &[&str],
    ) -> Result<()> {
        let histogram = HistogramVec::new(HistogramOpts::new(name, help), labels)?;
        registry.register(Box::new(histogram.clone()))?;
        self.histograms.insert(name.to_string(), histogram);
        Ok(())
    }

    /// 计数器自增
    pub fn inc_counter_vec(&self, name: &str, label_values: &[&str]) -> Result<()> {
        let counter = self
            .counters
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown counter: {}", name))?;
        counter.with_label_values(label_values).inc();
        Ok(())
    }

    /// 直方图观测
    pub fn observe_histogram_vec(&self, name: &str, label_values: &[&str], value: f64) -> Result<()> {
        let histogram = self
            .histograms
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown histogram: {}", name))?;
        histogram.with_label_values(label_values).observe(value);
        Ok(())
    }
}

/// 应用指标
pub struct AppMetrics {
    registry: Registry,
    collector: MetricsCollector,
}

impl AppMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let mut collector = MetricsCollector::new();

        collector.register_counter_vec(
            &registry,
            "http_requests_total",
            "Total HTTP requests",
            &["method", "path", "status"],
        )?;
        collector.register_counter_vec(
            &registry,
            "auth_requests_total",
            "Total session authentication attempts",
            &["result"],
        )?;
        collector.register_counter_vec(
            &registry,
            "user_login_total",
            "Total user login attempts",
            &["result"],
        )?;
        collector.register_counter_vec(
            &registry,
            "trades_total",
            "Total executed trades",
            &["side"],
        )?;
        collector.register_histogram_vec(
            &registry,
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            &["method", "path"],
        )?;

        Ok(Self { registry, collector })
    }

    /// 获取收集器
    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }

    /// 记录HTTP请求
    pub fn record_http_request(
        &self,
        method: &str,
        path: &str,
        status: u16,
        duration: Duration,
    ) -> Result<()> {
        self.collector
            .inc_counter_vec("http_requests_total", &[method, path, &status.to_string()])?;
        self.collector.observe_histogram_vec(
            "http_request_duration_seconds",
            &[method, path],
            duration.as_secs_f64(),
        )?;
        Ok(())
    }

    /// 导出Prometheus文本格式
    pub fn gather(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
