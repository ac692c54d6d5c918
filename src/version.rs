use serde::{Serialize, Serializer};

/// A parsed version number, or the "detected but version unknown" sentinel.
///
/// `Unknown` is distinct from `Known(0.0)`: a browser can be positively
/// identified while its version marker is missing or malformed. "Not this
/// browser at all" is represented separately by the caller (identity flags,
/// or the IE `-1.0` convention in [`crate::IeFacts`]).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Version {
    Known(f64),
    #[default]
    Unknown,
}

impl Version {
    pub fn is_known(self) -> bool {
        matches!(self, Version::Known(_))
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Version::Known(v) => Some(v),
            Version::Unknown => None,
        }
    }

    pub fn gt(self, threshold: f64) -> bool {
        matches!(self, Version::Known(v) if v > threshold)
    }

    pub fn ge(self, threshold: f64) -> bool {
        matches!(self, Version::Known(v) if v >= threshold)
    }

    pub fn lt(self, threshold: f64) -> bool {
        matches!(self, Version::Known(v) if v < threshold)
    }

    pub fn le(self, threshold: f64) -> bool {
        matches!(self, Version::Known(v) if v <= threshold)
    }

    pub fn eq_num(self, other: f64) -> bool {
        matches!(self, Version::Known(v) if v == other)
    }

    /// Inclusive range check; `Unknown` is never in any range.
    pub fn in_range(self, min: f64, max: f64) -> bool {
        matches!(self, Version::Known(v) if v >= min && v <= max)
    }
}

/// Serializes as the raw number, or null for the unknown sentinel.
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Version::Known(v) => serializer.serialize_f64(*v),
            Version::Unknown => serializer.serialize_none(),
        }
    }
}

pub fn version_gt(a: Version, b: Version) -> bool {
    matches!((a, b), (Version::Known(x), Version::Known(y)) if x > y)
}

pub fn version_ge(a: Version, b: Version) -> bool {
    matches!((a, b), (Version::Known(x), Version::Known(y)) if x >= y)
}

pub fn version_lt(a: Version, b: Version) -> bool {
    matches!((a, b), (Version::Known(x), Version::Known(y)) if x < y)
}

pub fn version_le(a: Version, b: Version) -> bool {
    matches!((a, b), (Version::Known(x), Version::Known(y)) if x <= y)
}

/// Two unknown sentinels compare equal; a sentinel never equals a number.
pub fn version_eq(a: Version, b: Version) -> bool {
    match (a, b) {
        (Version::Known(x), Version::Known(y)) => x == y,
        (Version::Unknown, Version::Unknown) => true,
        _ => false,
    }
}

/// Parse the leading integer of `s`, truncating at the first non-digit.
/// Leading ASCII whitespace is skipped. Returns `None` when no digit starts
/// the run.
pub(crate) fn leading_int(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let digits: &str = &s[..s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len()];
    if digits.is_empty() {
        return None;
    }
    // Digit runs always parse as f64; lengths beyond f64 precision saturate
    // rather than fail.
    digits.parse::<f64>().ok()
}

/// Parse the leading number of `s`, accepting a single decimal point
/// ("4.0.4" → 4.0). Leading ASCII whitespace is skipped; a bare leading dot
/// is accepted (".5" → 0.5).
pub(crate) fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    // A trailing lone dot is harmless to f64 parsing ("4." → 4.0).
    s[..end].parse::<f64>().ok()
}
