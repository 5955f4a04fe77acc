// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;
use crate::domain::models::mirror::{BatchResult, MirrorError};

/// 初始化指标系统
///
/// 安装 Prometheus 导出器并注册镜像流水线相关指标
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics address {}: {}. Metrics exporter not started.",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("mirror_batches_total", "Total number of mirror batches processed");
    describe_counter!(
        "mirror_items_total",
        "Total number of mirror items by outcome and failing stage"
    );
    describe_histogram!(
        "mirror_batch_duration_seconds",
        "Duration of mirror batches in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
}

pub fn record_item_success() {
    counter!("mirror_items_total", "outcome" => "success", "stage" => "none").increment(1);
}

pub fn record_item_failure(error: &MirrorError) {
    counter!(
        "mirror_items_total",
        "outcome" => "failure",
        "stage" => error.stage().as_str()
    )
    .increment(1);
}

pub fn record_batch(result: &BatchResult, elapsed_secs: f64) {
    counter!("mirror_batches_total").increment(1);
    histogram!("mirror_batch_duration_seconds").record(elapsed_secs);
    tracing::debug!(
        items = result.len(),
        succeeded = result.succeeded(),
        "Recorded batch metrics"
    );
}
