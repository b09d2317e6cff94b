//! Raw payload → display model.
//!
//! Pure and total: no I/O, no failure mode. Malformed timestamps fall back to
//! the raw string and unformattable metrics to [`PLACEHOLDER`], one cell at a
//! time. Input order is preserved.

use crate::classify::{classify, is_strong_move};
use crate::format::{MetricFormatter, PLACEHOLDER};
use crate::i18n::{reason_label, Locale};
use crate::models::{
    DisplayChange, DisplayRow, DisplaySignal, DisplaySnapshot, RawSignal, RawSnapshot,
    RawSymbolRow,
};
use crate::timestamp;
use std::collections::HashSet;
use tracing::debug;

pub fn assemble(snapshot: &RawSnapshot, signals: &[RawSignal], locale: Locale) -> DisplaySnapshot {
    let fmt = MetricFormatter::new(locale);

    let rows: Vec<DisplayRow> = snapshot
        .symbols
        .iter()
        .map(|row| display_row(&fmt, row))
        .collect();

    let known: HashSet<&str> = snapshot.symbols.iter().map(|r| r.symbol.as_str()).collect();
    let signals: Vec<DisplaySignal> = signals
        .iter()
        .map(|signal| {
            let in_snapshot = known.contains(signal.symbol.as_str());
            if !in_snapshot {
                debug!("{}: signal without a snapshot row", signal.symbol);
            }
            display_signal(&fmt, signal, locale, in_snapshot)
        })
        .collect();

    debug!("Assembled {} rows, {} signals ({})", rows.len(), signals.len(), locale);

    DisplaySnapshot {
        generated_at_display: timestamp::display_generated_at(&snapshot.generated_at, locale),
        asset_count: rows.len(),
        signal_count: signals.len(),
        rows,
        signals,
    }
}

fn display_row(fmt: &MetricFormatter, row: &RawSymbolRow) -> DisplayRow {
    DisplayRow {
        symbol: row.symbol.clone(),
        close: cell(&row.symbol, fmt.price(row.close)),
        change_24h: change(fmt, &row.symbol, row.change_24h),
        change_3d: change(fmt, &row.symbol, row.change_3d),
        change_7d: change(fmt, &row.symbol, row.change_7d),
        atr_3d: cell(&row.symbol, fmt.unsigned_percent(row.atr_3d)),
        atr_7d: cell(&row.symbol, fmt.unsigned_percent(row.atr_7d)),
        strong_move: is_strong_move(row.change_24h),
    }
}

fn display_signal(
    fmt: &MetricFormatter,
    signal: &RawSignal,
    locale: Locale,
    in_snapshot: bool,
) -> DisplaySignal {
    let sym = signal.symbol.as_str();
    DisplaySignal {
        symbol: signal.symbol.clone(),
        close: signal.close.map(|close| cell(sym, fmt.price(close))),
        change_24h: change(fmt, sym, signal.change_24h),
        change_3d: change(fmt, sym, signal.change_3d),
        change_7d: change(fmt, sym, signal.change_7d),
        atr_3d: cell(sym, fmt.unsigned_percent(signal.atr_3d)),
        atr_7d: cell(sym, fmt.unsigned_percent(signal.atr_7d)),
        strong_move: is_strong_move(signal.change_24h),
        reasons: signal
            .reasons
            .iter()
            .map(|code| reason_label(code, locale).into_owned())
            .collect(),
        in_snapshot,
    }
}

fn change(fmt: &MetricFormatter, symbol: &str, value: f64) -> DisplayChange {
    let class = classify(value);
    DisplayChange {
        text: cell(symbol, fmt.percent(value)),
        class,
        arrow: class.arrow(),
    }
}

fn cell(symbol: &str, formatted: crate::error::Result<String>) -> String {
    formatted.unwrap_or_else(|e| {
        debug!("{}: {}", symbol, e);
        PLACEHOLDER.to_string()
    })
}
