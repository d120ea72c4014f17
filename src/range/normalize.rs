use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Longest raw text a clock endpoint may hold (`HH:MM`).
pub const CLOCK_MAX_RAW_LEN: usize = 5;
/// Longest raw text a currency endpoint may hold; keeps `amount + 1` in range.
pub const AMOUNT_MAX_RAW_LEN: usize = 12;
/// Largest amount that fits in [`AMOUNT_MAX_RAW_LEN`] digits.
pub const AMOUNT_CEILING: u64 = 999_999_999_999;
pub const DEFAULT_SALARY_FLOOR: u64 = 1000;

/// Semantics of a bounded pair: what its endpoints look like and how they compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKind {
    CurrencyAmount,
    ClockTime,
}

impl RangeKind {
    pub fn max_raw_len(self) -> usize {
        match self {
            RangeKind::CurrencyAmount => AMOUNT_MAX_RAW_LEN,
            RangeKind::ClockTime => CLOCK_MAX_RAW_LEN,
        }
    }

    fn accepts(self, ch: char) -> bool {
        match self {
            RangeKind::CurrencyAmount => ch.is_ascii_digit(),
            RangeKind::ClockTime => ch.is_ascii_digit() || ch == ':',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RangeKind::CurrencyAmount => "currency amount",
            RangeKind::ClockTime => "clock time",
        }
    }
}

/// Time of day with minute precision, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self((time.num_seconds_from_midnight() / 60) as u16))
    }

    /// Parses exactly `HH:MM` with HH in 00..=23 and MM in 00..=59.
    pub fn parse_hhmm(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != CLOCK_MAX_RAW_LEN || bytes[2] != b':' {
            return None;
        }
        let digit = |idx: usize| {
            let byte = bytes[idx];
            byte.is_ascii_digit().then(|| u32::from(byte - b'0'))
        };
        let hour = digit(0)? * 10 + digit(1)?;
        let minute = digit(3)? * 10 + digit(4)?;
        Self::from_hm(hour, minute)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn to_hhmm(self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Validated endpoint value for a given [`RangeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalEndpoint {
    Amount(u64),
    Clock(ClockTime),
}

impl CanonicalEndpoint {
    pub fn kind(&self) -> RangeKind {
        match self {
            CanonicalEndpoint::Amount(_) => RangeKind::CurrencyAmount,
            CanonicalEndpoint::Clock(_) => RangeKind::ClockTime,
        }
    }

    /// Comparable scalar: the amount, or minutes since midnight.
    pub fn scalar(&self) -> u64 {
        match self {
            CanonicalEndpoint::Amount(amount) => *amount,
            CanonicalEndpoint::Clock(time) => u64::from(time.minutes()),
        }
    }
}

impl fmt::Display for CanonicalEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalEndpoint::Amount(amount) => write!(f, "{}", amount),
            CanonicalEndpoint::Clock(time) => f.write_str(&time.to_hhmm()),
        }
    }
}

/// Loose and strict parsing for one range kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    kind: RangeKind,
    floor: u64,
}

impl Normalizer {
    pub fn new(kind: RangeKind) -> Self {
        Self {
            kind,
            floor: DEFAULT_SALARY_FLOOR,
        }
    }

    /// Minimum accepted currency amount. Ignored for clock times.
    pub fn with_floor(mut self, floor: u64) -> Self {
        self.floor = floor;
        self
    }

    pub fn kind(&self) -> RangeKind {
        self.kind
    }

    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Keystroke-level cleanup: drops foreign characters and truncates.
    pub fn loose(&self, raw: &str) -> String {
        raw.chars()
            .filter(|ch| self.kind.accepts(*ch))
            .take(self.kind.max_raw_len())
            .collect()
    }

    /// Commit-level rewrite. Returns the canonical text, an empty string when
    /// the input cannot be recovered, or (currency only) the untouched input
    /// when it is not a number.
    pub fn strict(&self, raw: &str) -> String {
        match self.kind {
            RangeKind::ClockTime => strict_clock(raw),
            RangeKind::CurrencyAmount => self.strict_amount(raw),
        }
    }

    /// Reads stored text back as a canonical endpoint, if it is one.
    pub fn canonical(&self, text: &str) -> Option<CanonicalEndpoint> {
        match self.kind {
            RangeKind::ClockTime => ClockTime::parse_hhmm(text).map(CanonicalEndpoint::Clock),
            RangeKind::CurrencyAmount => parse_amount(text)
                .filter(|amount| *amount >= self.floor)
                .map(CanonicalEndpoint::Amount),
        }
    }

    /// Renders a canonical endpoint as the text the form stores.
    pub fn format(&self, endpoint: &CanonicalEndpoint) -> String {
        endpoint.to_string()
    }

    fn strict_amount(&self, raw: &str) -> String {
        match parse_amount(raw) {
            Some(amount) => amount.max(self.floor).to_string(),
            None => raw.to_string(),
        }
    }
}

fn parse_amount(text: &str) -> Option<u64> {
    let value = text.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn strict_clock(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    let candidate = if value.contains(':') {
        value.to_string()
    } else if (3..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit()) {
        let padded = format!("{:0>4}", value);
        format!("{}:{}", &padded[..2], &padded[2..])
    } else {
        return String::new();
    };

    ClockTime::parse_hhmm(&candidate)
        .map(ClockTime::to_hhmm)
        .unwrap_or_default()
}
