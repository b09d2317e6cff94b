use super::Locale;
use std::borrow::Cow;
use std::str::FromStr;

/// Reason codes the upstream attaches to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    BigMove24h,
    AtrSpike,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 2] = [ReasonCode::BigMove24h, ReasonCode::AtrSpike];

    pub fn code(self) -> &'static str {
        match self {
            ReasonCode::BigMove24h => "big_move_24h",
            ReasonCode::AtrSpike => "atr_spike",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ReasonCode::BigMove24h, Locale::En) => "Big 24h move",
            (ReasonCode::AtrSpike, Locale::En) => "ATR spike",
            (ReasonCode::BigMove24h, Locale::Pl) => "Duży ruch w 24h",
            (ReasonCode::AtrSpike, Locale::Pl) => "Wybicie ATR",
        }
    }
}

impl FromStr for ReasonCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReasonCode::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or(())
    }
}

/// Human label for a raw reason code. Unknown codes come back unchanged.
pub fn reason_label(code: &str, locale: Locale) -> Cow<'_, str> {
    match code.parse::<ReasonCode>() {
        Ok(reason) => Cow::Borrowed(reason.label(locale)),
        Err(()) => Cow::Borrowed(code),
    }
}
