use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Logs how long a scope took once it is dropped.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        debug!("{} started", label);
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(elapsed_ms = self.elapsed().as_millis() as u64, "{} done", self.label);
    }
}

/// Insert `sep` between every three digits of an unsigned integer string.
///
/// Strings shorter than `min_digits` are returned as-is.
pub fn group_digits(digits: &str, sep: char, min_digits: usize) -> String {
    if digits.len() < min_digits.max(4) {
        return digits.to_string();
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * sep.len_utf8());
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(sep);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567", ',', 4), "1,234,567");
        assert_eq!(group_digits("0", ',', 4), "0");
        assert_eq!(group_digits("999", ',', 4), "999");
        assert_eq!(group_digits("1234", ',', 4), "1,234");
    }

    #[test]
    fn test_group_digits_min_grouping() {
        assert_eq!(group_digits("1234", ' ', 5), "1234");
        assert_eq!(group_digits("12345", ' ', 5), "12 345");
    }

    #[test]
    fn test_timer_measures() {
        let t = Timer::start("noop");
        assert!(t.elapsed() < Duration::from_secs(5));
    }
}
