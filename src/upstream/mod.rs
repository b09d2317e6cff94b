//! The reporting service, as seen by the presentation core.

pub mod http_client;

use crate::config::UpstreamConfig;
use crate::error::{Result, ViewError};
use crate::models::{RawSignal, RawSnapshot, SignalsResponse};
use async_trait::async_trait;
use tracing::{debug, warn};

use self::http_client::HttpClient;

const LATEST_REPORT_PATH: &str = "/reports/latest";
const SIGNALS_PATH: &str = "/signals";

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable source of report snapshots and signals.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_latest_report(&self) -> Result<RawSnapshot>;
    async fn fetch_signals(&self) -> Result<Vec<RawSignal>>;
}

// ── HTTP source ───────────────────────────────────────────────────────────────

pub struct HttpReportSource {
    client: HttpClient,
}

impl HttpReportSource {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.client.endpoint(path).map_err(ViewError::upstream)?;
        self.client.get_json(&url).await.map_err(|e| {
            warn!("{}", e);
            ViewError::upstream(e)
        })
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_latest_report(&self) -> Result<RawSnapshot> {
        let snapshot: RawSnapshot = self.get(LATEST_REPORT_PATH).await?;
        debug!(
            "Report {}: {} symbols",
            snapshot.generated_at,
            snapshot.symbols.len()
        );
        Ok(snapshot)
    }

    async fn fetch_signals(&self) -> Result<Vec<RawSignal>> {
        let resp: SignalsResponse = self.get(SIGNALS_PATH).await?;
        Ok(unwrap_signals(resp))
    }
}

/// The envelope's `count` is advisory; the list is authoritative.
fn unwrap_signals(resp: SignalsResponse) -> Vec<RawSignal> {
    if let Some(count) = resp.count {
        if count != resp.signals.len() as u64 {
            debug!(
                "Signals count {} disagrees with {} entries",
                count,
                resp.signals.len()
            );
        }
    }
    resp.signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signals_list_wins_over_count() {
        let resp: SignalsResponse = serde_json::from_value(json!({
            "count": 5,
            "signals": [{
                "symbol": "TAO",
                "change_24h": 9.1, "change_3d": 12.0, "change_7d": -0.2,
                "atr_3d": 4.0, "atr_7d": 7.5,
                "reasons": ["big_move_24h", "atr_spike"]
            }]
        }))
        .unwrap();

        let signals = unwrap_signals(resp);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].close, None);
        assert_eq!(signals[0].reasons, ["big_move_24h", "atr_spike"]);
    }

    #[test]
    fn test_report_payload_decodes() {
        let snap: RawSnapshot = serde_json::from_value(json!({
            "generated_at": "2025-12-09-16-00-06",
            "symbols": [{
                "symbol": "BTC", "close": 91234.5,
                "change_24h": 1.5, "change_3d": -2.0, "change_7d": 4.25,
                "atr_3d": 1.1, "atr_7d": 2.2
            }]
        }))
        .unwrap();
        assert_eq!(snap.symbols[0].symbol, "BTC");
    }

    #[test]
    fn test_missing_field_is_a_decode_error() {
        let res = serde_json::from_value::<RawSnapshot>(json!({
            "generated_at": "2025-12-09-16-00-06",
            "symbols": [{ "symbol": "BTC", "close": "91234.5" }]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_unreachable_host_is_an_upstream_failure() {
        let source = HttpReportSource::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            max_retries: 0,
            ..UpstreamConfig::default()
        })
        .unwrap();

        let res = tokio_test::block_on(source.fetch_latest_report());
        assert!(matches!(res, Err(ViewError::UpstreamFetchFailure(_))));
    }
}
