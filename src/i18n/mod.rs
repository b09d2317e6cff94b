//! Locales and the single translation resource shared by every view.
//!
//! Each table is an exhaustive `match` on [`Locale`], so adding a locale
//! refuses to compile until every string, number convention and reason
//! label has an entry for it.

pub mod reasons;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use self::reasons::{reason_label, ReasonCode};

// ── Locale ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pl,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Pl];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pl => "pl",
        }
    }

    pub fn numbers(self) -> NumberConventions {
        match self {
            Locale::En => NumberConventions {
                group_separator: ',',
                decimal_separator: '.',
                min_grouping_digits: 4,
            },
            // CLDR: pl does not group four-digit integers ("1234,50").
            Locale::Pl => NumberConventions {
                group_separator: '\u{a0}',
                decimal_separator: ',',
                min_grouping_digits: 5,
            },
        }
    }

    pub fn texts(self) -> &'static Translations {
        match self {
            Locale::En => &EN,
            Locale::Pl => &PL,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts bare language codes and region-tagged forms ("pl-PL", "en_US").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match lang.as_str() {
            "en" => Ok(Locale::En),
            "pl" => Ok(Locale::Pl),
            _ => Err(format!("unsupported locale {:?}", s)),
        }
    }
}

/// Digit grouping and decimal mark for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberConventions {
    pub group_separator: char,
    pub decimal_separator: char,
    /// Integers with fewer digits than this are left ungrouped.
    pub min_grouping_digits: usize,
}

// ── UI strings ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Translations {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub language_label: &'static str,
    pub snapshot_title: &'static str,
    pub generated_at: &'static str,
    pub signals_title: &'static str,
    pub signals_subtitle: &'static str,
    pub no_signals: &'static str,
    pub no_data: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
    pub reasons_label: &'static str,
    pub assets_suffix: &'static str,
    pub active_suffix: &'static str,
    pub columns: Columns,
}

#[derive(Debug)]
pub struct Columns {
    pub symbol: &'static str,
    pub price: &'static str,
    pub change_24h: &'static str,
    pub change_3d: &'static str,
    pub change_7d: &'static str,
    pub atr_3d: &'static str,
    pub atr_7d: &'static str,
}

static EN: Translations = Translations {
    title: "Chainsignal",
    subtitle: "Daily crypto volatility & momentum monitor",
    language_label: "Language",
    snapshot_title: "Last market snapshot",
    generated_at: "Report generated",
    signals_title: "Signals",
    signals_subtitle: "Signals (> 8% / 24h by default)",
    no_signals: "No active signals for current thresholds.",
    no_data: "No market data in the latest report.",
    loading: "Loading data from backend...",
    error: "Failed to fetch data from API.",
    reasons_label: "Reasons",
    assets_suffix: "assets",
    active_suffix: "active",
    columns: Columns {
        symbol: "Symbol",
        price: "Price",
        change_24h: "24h",
        change_3d: "3 days",
        change_7d: "7 days",
        atr_3d: "ATR 3 days",
        atr_7d: "ATR 7 days",
    },
};

static PL: Translations = Translations {
    title: "Chainsignal",
    subtitle: "Dzienny monitoring zmienności i momentum rynku krypto",
    language_label: "Język",
    snapshot_title: "Ostatni snapshot rynku",
    generated_at: "Raport wygenerowany",
    signals_title: "Sygnały",
    signals_subtitle: "Sygnały (> 8% / 24h domyślnie)",
    no_signals: "Brak aktywnych sygnałów dla ustawionych progów.",
    no_data: "Brak danych rynkowych w ostatnim raporcie.",
    loading: "Ładowanie danych z backendu...",
    error: "Nie udało się pobrać danych z API.",
    reasons_label: "Powody",
    assets_suffix: "aktywów",
    active_suffix: "aktywne",
    columns: Columns {
        symbol: "Symbol",
        price: "Cena",
        change_24h: "24h",
        change_3d: "3 dni",
        change_7d: "7 dni",
        atr_3d: "ATR 3 dni",
        atr_7d: "ATR 7 dni",
    },
};
