use serde::Serialize;

/// Changes within ±this many percent read as no move at all.
pub const FLAT_DEADBAND_PCT: f64 = 0.5;

/// A 24h move beyond this is a "strong move" (the upstream's default signal threshold).
pub const STRONG_MOVE_PCT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeClass {
    Up,
    Down,
    Flat,
}

impl ChangeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeClass::Up => "up",
            ChangeClass::Down => "down",
            ChangeClass::Flat => "flat",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            ChangeClass::Up => "↑",
            ChangeClass::Down => "↓",
            ChangeClass::Flat => "→",
        }
    }
}

/// Bucket a percentage change. The deadband is inclusive on the flat side.
pub fn classify(change_pct: f64) -> ChangeClass {
    classify_with(change_pct, FLAT_DEADBAND_PCT)
}

pub fn classify_with(change_pct: f64, deadband: f64) -> ChangeClass {
    if !change_pct.is_finite() || change_pct.abs() <= deadband {
        ChangeClass::Flat
    } else if change_pct > 0.0 {
        ChangeClass::Up
    } else {
        ChangeClass::Down
    }
}

pub fn is_strong_move(change_pct: f64) -> bool {
    change_pct.is_finite() && change_pct.abs() > STRONG_MOVE_PCT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadband_boundaries() {
        assert_eq!(classify(0.49), ChangeClass::Flat);
        assert_eq!(classify(0.5), ChangeClass::Flat);
        assert_eq!(classify(-0.5), ChangeClass::Flat);
        assert_eq!(classify(0.51), ChangeClass::Up);
        assert_eq!(classify(-0.51), ChangeClass::Down);
        assert_eq!(classify(0.0), ChangeClass::Flat);
    }

    #[test]
    fn test_non_finite_is_flat() {
        assert_eq!(classify(f64::NAN), ChangeClass::Flat);
        assert_eq!(classify(f64::INFINITY), ChangeClass::Flat);
    }

    #[test]
    fn test_zero_deadband_is_sign_only() {
        assert_eq!(classify_with(0.01, 0.0), ChangeClass::Up);
        assert_eq!(classify_with(-0.01, 0.0), ChangeClass::Down);
        assert_eq!(classify_with(0.0, 0.0), ChangeClass::Flat);
    }

    #[test]
    fn test_strong_move_is_strictly_beyond_threshold() {
        assert!(!is_strong_move(8.0));
        assert!(is_strong_move(8.01));
        assert!(is_strong_move(-12.3));
        assert!(!is_strong_move(f64::NAN));
    }

    #[test]
    fn test_tags_and_arrows() {
        assert_eq!(ChangeClass::Up.as_str(), "up");
        assert_eq!(ChangeClass::Down.arrow(), "↓");
        assert_eq!(serde_json::to_string(&ChangeClass::Flat).unwrap(), "\"flat\"");
    }
}
