use fancy_regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::version::{leading_int, Version};

/// iOS classification record.
///
/// `is_ios` and `version` are deliberately decoupled: the device tokens come
/// from the user-agent string while the version is only extracted when the
/// platform hint itself names an Apple mobile device. An identifier can
/// assert device identity while the platform disagrees, yielding
/// `is_ios = true` with `version = Unknown`.
///
/// The per-major flags (`is_ios5`..`is_ios9`) are computed from their own
/// "OS N(_d)+ like Mac OS X" pattern, not derived from `version`, and may
/// disagree with it on malformed strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IosFacts {
    pub is_ipad: bool,
    pub is_iphone: bool,
    pub is_ipod: bool,
    pub is_ios: bool,
    pub is_ios5: bool,
    pub is_ios6: bool,
    pub is_ios7: bool,
    pub is_ios8: bool,
    pub is_ios9: bool,
    pub version: Version,
}

/// Pre-compiled iOS matchers.
///
/// The device tokens are anchored to an opening parenthesis and must be
/// immediately followed by `;` or `)` so that "CPU iPhone OS" (the OS-name
/// token later in the string) never registers as a device match.
pub(crate) struct IosMatchers {
    ipad: Regex,
    iphone: Regex,
    ipod: Regex,
    /// Apple mobile device token in the *platform* string (case-sensitive).
    apple_platform: Regex,
    /// "OS 17_0" style version marker (case-sensitive, major captured).
    os_version: Regex,
    /// Major-version flag patterns for iOS 5 through 9, in order.
    majors: Vec<Regex>,
}

impl IosMatchers {
    pub fn compile() -> Result<Self> {
        let majors = (5u32..=9)
            .map(|v| {
                Ok(Regex::new(&format!(
                    r"(?i)OS {v}(_\d)+ like Mac OS X"
                ))?)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ipad: Regex::new(r"(?i)\(iPad[;)]")?,
            iphone: Regex::new(r"(?i)\(iPhone[;)]")?,
            ipod: Regex::new(r"(?i)\(iPod[;) ]")?,
            apple_platform: Regex::new(r"iP(?:hone|od|ad)")?,
            os_version: Regex::new(r"OS (\d+)_\d+_?\d*")?,
            majors,
        })
    }

    pub fn classify(&self, user_agent: &str, platform: &str) -> IosFacts {
        let is_ipad = matches(&self.ipad, user_agent);
        let is_iphone = matches(&self.iphone, user_agent);
        let is_ipod = matches(&self.ipod, user_agent);

        let mut flags = [false; 5];
        for (flag, re) in flags.iter_mut().zip(&self.majors) {
            *flag = matches(re, user_agent);
        }

        IosFacts {
            is_ipad,
            is_iphone,
            is_ipod,
            is_ios: is_ipad || is_iphone || is_ipod,
            is_ios5: flags[0],
            is_ios6: flags[1],
            is_ios7: flags[2],
            is_ios8: flags[3],
            is_ios9: flags[4],
            version: self.extract_version(user_agent, platform),
        }
    }

    fn extract_version(&self, user_agent: &str, platform: &str) -> Version {
        if !matches(&self.apple_platform, platform) {
            return Version::Unknown;
        }
        let caps = match self.os_version.captures(user_agent) {
            Ok(Some(c)) => c,
            _ => return Version::Unknown,
        };
        caps.get(1)
            .and_then(|m| leading_int(m.as_str()))
            .map_or(Version::Unknown, Version::Known)
    }
}

fn matches(re: &Regex, haystack: &str) -> bool {
    re.is_match(haystack).unwrap_or(false)
}
