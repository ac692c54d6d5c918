use fancy_regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::version::{leading_float, Version};

/// Android classification record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AndroidFacts {
    pub is_android: bool,
    /// Android with a known version below 4.
    pub is_android_old: bool,
    /// Pre-Chromium stock browser: an embedded engine version below 537.
    /// A browser that intentionally ships an old engine build for
    /// compatibility testing will misclassify; accepted heuristic limit.
    pub is_android_stock: bool,
    pub version: Version,
}

pub(crate) struct AndroidMatchers {
    marker: Regex,
    webkit_version: Regex,
}

/// The version is read from the text right after the case-sensitive
/// `"Android "` marker; a lowercase-only occurrence still sets `is_android`
/// but leaves the version unknown.
const MARKER: &str = "Android";

impl AndroidMatchers {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            marker: Regex::new("(?i)Android")?,
            webkit_version: Regex::new(r"AppleWebKit/([\d.]+)")?,
        })
    }

    pub fn classify(&self, user_agent: &str) -> AndroidFacts {
        let is_android = self.marker.is_match(user_agent).unwrap_or(false);
        let version = extract_version(user_agent);
        let is_android_old = is_android && version.lt(4.0);
        let is_android_stock = is_android && self.engine_version(user_agent).lt(537.0);

        AndroidFacts {
            is_android,
            is_android_old,
            is_android_stock,
            version,
        }
    }

    fn engine_version(&self, user_agent: &str) -> Version {
        let caps = match self.webkit_version.captures(user_agent) {
            Ok(Some(c)) => c,
            _ => return Version::Unknown,
        };
        caps.get(1)
            .and_then(|m| leading_float(m.as_str()))
            .map_or(Version::Unknown, Version::Known)
    }
}

fn extract_version(user_agent: &str) -> Version {
    let start = match user_agent.find(MARKER) {
        Some(idx) => idx + MARKER.len() + 1,
        None => return Version::Unknown,
    };
    user_agent
        .get(start..)
        .and_then(leading_float)
        .map_or(Version::Unknown, Version::Known)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m() -> AndroidMatchers {
        AndroidMatchers::compile().unwrap()
    }

    #[test]
    fn modern_android() {
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8 Pro) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/119.0.0.0 Mobile Safari/537.36";
        let facts = m().classify(ua);
        assert!(facts.is_android);
        assert!(!facts.is_android_old);
        assert!(!facts.is_android_stock);
        assert_eq!(facts.version, Version::Known(14.0));
    }

    #[test]
    fn old_android_versions() {
        let ua = "Mozilla/5.0 (Linux; Android 2.3.6; GT-S5830i) AppleWebKit/533.1";
        let facts = m().classify(ua);
        assert!(facts.is_android_old);
        assert_eq!(facts.version, Version::Known(2.3));

        let ua4 = "Mozilla/5.0 (Linux; Android 4.0.4; Galaxy Nexus) AppleWebKit/535.19";
        assert!(!m().classify(ua4).is_android_old);
    }

    #[test]
    fn stock_browser_has_old_engine() {
        let ua = "Mozilla/5.0 (Linux; Android 4.3; GT-I9300) AppleWebKit/534.30 \
             (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
        assert!(m().classify(ua).is_android_stock);

        let chrome = "Mozilla/5.0 (Linux; Android 13) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/118.0.0.0 Mobile Safari/537.36";
        assert!(!m().classify(chrome).is_android_stock);
    }

    #[test]
    fn marker_at_end_of_string() {
        let facts = m().classify("something Android");
        assert!(facts.is_android);
        assert_eq!(facts.version, Version::Unknown);
        assert!(!facts.is_android_old);
    }

    #[test]
    fn not_android() {
        let facts = m().classify("Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        assert!(!facts.is_android);
        assert_eq!(facts.version, Version::Unknown);
    }
}
