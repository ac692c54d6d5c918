use fancy_regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::version::{leading_float, leading_int, Version};

/// Vendor string reported by Chromium-family browsers.
const GOOGLE_VENDOR: &str = "Google Inc.";
/// Vendor string reported by Safari.
const APPLE_VENDOR: &str = "Apple Computer, Inc.";

/// Application-name marker for classic IE.
const IE_APP_NAME: &str = "Microsoft Internet Explorer";
/// IE 11 reports a Netscape-compatible application name with a Trident/rv
/// version pattern.
const NETSCAPE_APP_NAME: &str = "Netscape";

/// Browser identity and version record.
///
/// Chromium-based Edge and Opera carry Chrome tokens, the chrome runtime
/// object, and the Google vendor string, so `is_chrome` and `is_safari`
/// both exclude the Edge/Opera markers. Versions are only extracted when the
/// corresponding identity flag is true.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrowserFacts {
    pub is_firefox: bool,
    pub is_chrome: bool,
    pub is_safari: bool,
    pub is_edge: bool,
    pub is_opera: bool,
    /// WebP image support tracks Chromium-family engines.
    pub webp: bool,
    pub chrome_version: Version,
    pub firefox_version: Version,
    pub safari_version: Version,
    pub edge_version: Version,
    pub opera_version: Version,
}

/// Internet Explorer record. `version` is `-1.0` when the input is not IE at
/// all; IE has no "present but version unknown" state, so the sentinel
/// doubles as the identity signal (`is_ie` = version > -1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IeFacts {
    pub version: f64,
    pub is_ie: bool,
    pub is_ie11: bool,
    pub is_ie11_down: bool,
    pub is_ie11_up: bool,
    pub is_ie10: bool,
    pub is_ie10_down: bool,
    pub is_ie10_up: bool,
    pub is_ie9: bool,
    pub is_ie9_down: bool,
    pub is_ie9_up: bool,
    pub is_ie8: bool,
    pub is_ie8_down: bool,
    pub is_ie8_up: bool,
}

impl IeFacts {
    pub(crate) fn from_version(version: f64) -> Self {
        let is_ie = version > -1.0;
        Self {
            version,
            is_ie,
            is_ie11: version == 11.0,
            is_ie11_down: version <= 11.0 && is_ie,
            is_ie11_up: version >= 11.0 && is_ie,
            is_ie10: version == 10.0,
            is_ie10_down: version <= 10.0 && is_ie,
            is_ie10_up: version >= 10.0 && is_ie,
            is_ie9: version == 9.0,
            is_ie9_down: version <= 9.0 && is_ie,
            is_ie9_up: version >= 9.0 && is_ie,
            is_ie8: version == 8.0,
            is_ie8_down: version <= 8.0 && is_ie,
            is_ie8_up: version >= 8.0 && is_ie,
        }
    }
}

pub(crate) struct BrowserMatchers {
    edge_marker: Regex,
    opera_marker: Regex,
    /// "safari" somewhere, "chrome" nowhere before it.
    safari_shape: Regex,
    safari_guard: Regex,
    chrome_version: Regex,
    firefox_version: Regex,
    safari_version: Regex,
    edg_version: Regex,
    edge_version: Regex,
    opr_version: Regex,
    opera_version: Regex,
    msie_version: Regex,
    trident_rv: Regex,
}

impl BrowserMatchers {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            edge_marker: Regex::new(r"(?i)\b(?:Edg|Edge)/")?,
            opera_marker: Regex::new(r"(?i)\b(?:OPR|Opera)/")?,
            safari_shape: Regex::new(r"(?i)^(?:(?!chrome).)*safari")?,
            safari_guard: Regex::new(r"(?i)Safari")?,
            chrome_version: Regex::new(r"(?i)\bChrome/(\d+)")?,
            firefox_version: Regex::new(r"(?i)\bFirefox/(\d+)")?,
            safari_version: Regex::new(r"(?i)\bVersion/(\d+)")?,
            // Chromium Edge reports Edg/NNN; legacy Edge reports Edge/NNN.
            edg_version: Regex::new(r"(?i)\bEdg/(\d+)")?,
            edge_version: Regex::new(r"(?i)\bEdge/(\d+)")?,
            opr_version: Regex::new(r"(?i)\bOPR/(\d+)")?,
            opera_version: Regex::new(r"(?i)\bOpera[\s/](\d+)")?,
            // IE markers are matched case-sensitively, as reported.
            msie_version: Regex::new(r"MSIE (\d[\d.]*)")?,
            trident_rv: Regex::new(r"Trident/.*rv:(\d[\d.]*)")?,
        })
    }

    pub fn classify(
        &self,
        user_agent: &str,
        has_chrome_runtime: bool,
        vendor: Option<&str>,
    ) -> BrowserFacts {
        let is_firefox = user_agent.to_ascii_lowercase().contains("firefox");
        let is_edge = matches(&self.edge_marker, user_agent);
        let is_opera = matches(&self.opera_marker, user_agent);
        let is_chrome =
            has_chrome_runtime && vendor == Some(GOOGLE_VENDOR) && !is_edge && !is_opera;
        let is_safari = vendor == Some(APPLE_VENDOR)
            && matches(&self.safari_shape, user_agent)
            && !is_edge
            && !is_opera;
        let webp = (is_chrome || is_edge || is_opera) && !is_safari;

        BrowserFacts {
            is_firefox,
            is_chrome,
            is_safari,
            is_edge,
            is_opera,
            webp,
            chrome_version: gated(is_chrome, || int_capture(&self.chrome_version, user_agent)),
            firefox_version: gated(is_firefox, || int_capture(&self.firefox_version, user_agent)),
            safari_version: gated(is_safari, || self.extract_safari_version(user_agent)),
            edge_version: gated(is_edge, || {
                first_known(
                    int_capture(&self.edg_version, user_agent),
                    || int_capture(&self.edge_version, user_agent),
                )
            }),
            opera_version: gated(is_opera, || {
                first_known(
                    int_capture(&self.opr_version, user_agent),
                    || int_capture(&self.opera_version, user_agent),
                )
            }),
        }
    }

    fn extract_safari_version(&self, user_agent: &str) -> Version {
        if !matches(&self.safari_guard, user_agent) {
            return Version::Unknown;
        }
        int_capture(&self.safari_version, user_agent)
    }

    /// IE version dispatches on the reported application name; anything else
    /// yields the -1 "not IE" sentinel.
    pub fn classify_ie(&self, user_agent: &str, app_name: &str) -> IeFacts {
        let version = match app_name {
            IE_APP_NAME => float_capture(&self.msie_version, user_agent),
            NETSCAPE_APP_NAME => float_capture(&self.trident_rv, user_agent),
            _ => None,
        };
        IeFacts::from_version(version.unwrap_or(-1.0))
    }
}

fn matches(re: &Regex, haystack: &str) -> bool {
    re.is_match(haystack).unwrap_or(false)
}

fn gated(flag: bool, extract: impl FnOnce() -> Version) -> Version {
    if flag {
        extract()
    } else {
        Version::Unknown
    }
}

fn first_known(primary: Version, fallback: impl FnOnce() -> Version) -> Version {
    if primary.is_known() {
        primary
    } else {
        fallback()
    }
}

fn int_capture(re: &Regex, haystack: &str) -> Version {
    capture(re, haystack, leading_int)
}

fn float_capture(re: &Regex, haystack: &str) -> Option<f64> {
    match capture(re, haystack, leading_float) {
        Version::Known(v) => Some(v),
        Version::Unknown => None,
    }
}

fn capture(re: &Regex, haystack: &str, parse: fn(&str) -> Option<f64>) -> Version {
    let caps = match re.captures(haystack) {
        Ok(Some(c)) => c,
        _ => return Version::Unknown,
    };
    caps.get(1)
        .and_then(|m| parse(m.as_str()))
        .map_or(Version::Unknown, Version::Known)
}
