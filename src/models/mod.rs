use crate::classify::ChangeClass;
use serde::{Deserialize, Serialize};

// ── Upstream payloads ─────────────────────────────────────────────────────────

/// `GET /reports/latest`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSnapshot {
    /// Service-local `YYYY-MM-DD-HH-MM-SS`; only `timestamp` may interpret it.
    pub generated_at: String,
    pub symbols: Vec<RawSymbolRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSymbolRow {
    pub symbol: String,
    pub close: f64,
    pub change_24h: f64,
    pub change_3d: f64,
    pub change_7d: f64,
    pub atr_3d: f64,
    pub atr_7d: f64,
}

/// One entry of `GET /signals`.
///
/// `close` is absent from some upstream versions, hence optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSignal {
    pub symbol: String,
    #[serde(default)]
    pub close: Option<f64>,
    pub change_24h: f64,
    pub change_3d: f64,
    pub change_7d: f64,
    pub atr_3d: f64,
    pub atr_7d: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// `GET /signals` envelope. `count` is informational only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalsResponse {
    #[serde(default)]
    pub count: Option<u64>,
    pub signals: Vec<RawSignal>,
}

// ── Display model ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplaySnapshot {
    pub generated_at_display: String,
    pub rows: Vec<DisplayRow>,
    pub signals: Vec<DisplaySignal>,
    pub asset_count: usize,
    pub signal_count: usize,
}

impl DisplaySnapshot {
    /// Nothing to show in either section; render the "no data" state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.signals.is_empty()
    }
}

/// A formatted, classified percentage change.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayChange {
    pub text: String,
    pub class: ChangeClass,
    pub arrow: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayRow {
    pub symbol: String,
    pub close: String,
    pub change_24h: DisplayChange,
    pub change_3d: DisplayChange,
    pub change_7d: DisplayChange,
    pub atr_3d: String,
    pub atr_7d: String,
    pub strong_move: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplaySignal {
    pub symbol: String,
    /// `None` when the upstream omitted the price.
    pub close: Option<String>,
    pub change_24h: DisplayChange,
    pub change_3d: DisplayChange,
    pub change_7d: DisplayChange,
    pub atr_3d: String,
    pub atr_7d: String,
    pub strong_move: bool,
    pub reasons: Vec<String>,
    /// Whether the symbol also appears among the snapshot rows.
    pub in_snapshot: bool,
}
