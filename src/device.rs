use serde::Serialize;

use crate::cascade::Cascade;
use crate::error::Result;

/// Device category; `Desktop` is the fallback when no other signal is
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    SmartTv,
    Console,
    Wearable,
    Xr,
    Embedded,
}

impl DeviceType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "desktop" => Some(Self::Desktop),
            "mobile" => Some(Self::Mobile),
            "tablet" => Some(Self::Tablet),
            "smarttv" => Some(Self::SmartTv),
            "console" => Some(Self::Console),
            "wearable" => Some(Self::Wearable),
            "xr" => Some(Self::Xr),
            "embedded" => Some(Self::Embedded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::SmartTv => "smarttv",
            Self::Console => "console",
            Self::Wearable => "wearable",
            Self::Xr => "xr",
            Self::Embedded => "embedded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceFacts {
    pub is_tablet: bool,
    pub is_mobile: bool,
    pub is_desktop: bool,
    pub device: DeviceType,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DeviceRule {
    device: DeviceType,
    /// Bare model-number tokens (e.g. "sm-t976b") are ambiguous without OS
    /// context; gated rules only fire when a mobile OS was already detected.
    needs_mobile_os: bool,
}

/// Ordered device rules. Each pattern is an open disjunction of known
/// device/vendor tokens; new tokens are appended in place without touching
/// the precedence structure.
pub(crate) fn build_cascade() -> Result<Cascade<DeviceRule>> {
    let ungated = |device| DeviceRule {
        device,
        needs_mobile_os: false,
    };
    Cascade::build([
        (
            r"smart.?tv|googletv|apple.?tv|hbbtv|pov_tv|netcast|nettv|roku|dlnadoc|philips|panasonic|lg.*smart|webos|crkey|chromecast",
            ungated(DeviceType::SmartTv),
        ),
        (
            r"playstation|xbox|nintendo|ouya|shield.*(?:gaming|portable)|retroid",
            ungated(DeviceType::Console),
        ),
        (
            r"vr|quest|oculus|pico|glass|mobile.?vr",
            ungated(DeviceType::Xr),
        ),
        (
            r"watch|wearable|pebble|gear.?live|glass|tizen.*samsung|sm-r\d{3}",
            ungated(DeviceType::Wearable),
        ),
        (
            r"tesla|vehicle|car.?browser|homepod|echo|alexa|windows.?iot|embedded",
            ungated(DeviceType::Embedded),
        ),
        (
            r"ipad|android 3|sch-i800|playbook|tablet|kindle|gt-p1000|sgh-t849|shw-m180s|a510|a511|a100|dell streak|silk|sm-[tx]\d{3}",
            DeviceRule {
                device: DeviceType::Tablet,
                needs_mobile_os: true,
            },
        ),
        // Checked independently of the OS flags so Windows Phone, BlackBerry
        // and friends still classify as mobile.
        (
            r"iphone|ipod|android|blackberry|opera mini|opera mobi|skyfire|maemo|windows phone|palm|iemobile|symbian|fennec",
            ungated(DeviceType::Mobile),
        ),
    ])
}

pub(crate) fn classify(
    cascade: &Cascade<DeviceRule>,
    user_agent: &str,
    is_android: bool,
    is_ios: bool,
) -> DeviceFacts {
    let is_mobile_os = is_android || is_ios;
    let device = cascade
        .first_match_where(user_agent, |rule| !rule.needs_mobile_os || is_mobile_os)
        .map_or(DeviceType::Desktop, |rule| rule.device);

    DeviceFacts {
        is_tablet: device == DeviceType::Tablet,
        is_mobile: device == DeviceType::Mobile,
        is_desktop: device == DeviceType::Desktop,
        device,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(ua: &str, is_android: bool, is_ios: bool) -> DeviceType {
        classify(&build_cascade().unwrap(), ua, is_android, is_ios).device
    }

    #[test]
    fn iphone_is_mobile() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
        let facts = classify(&build_cascade().unwrap(), ua, false, true);
        assert_eq!(facts.device, DeviceType::Mobile);
        assert!(facts.is_mobile);
        assert!(!facts.is_desktop);
    }

    #[test]
    fn ipad_is_tablet_when_mobile_os_flagged() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1";
        assert_eq!(device(ua, false, true), DeviceType::Tablet);
    }

    #[test]
    fn tablet_token_without_mobile_os_falls_through() {
        // A bare tablet-shaped model number on a desktop string must not
        // claim the tablet slot.
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) SM-T976B AppleWebKit/537.36";
        assert_eq!(device(ua, false, false), DeviceType::Desktop);
        assert_eq!(device(ua, true, false), DeviceType::Tablet);
    }

    #[test]
    fn windows_phone_is_mobile_without_os_flags() {
        let ua = "Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; Trident/6.0; \
             IEMobile/10.0; ARM; Touch; NOKIA; Lumia 920)";
        assert_eq!(device(ua, false, false), DeviceType::Mobile);
    }

    #[test]
    fn special_categories_take_precedence() {
        assert_eq!(
            device("Mozilla/5.0 (SMART-TV; Linux; Tizen 6.0) AppleWebKit/537.36", false, false),
            DeviceType::SmartTv
        );
        assert_eq!(
            device("Mozilla/5.0 (PlayStation 5/SmartTV) AppleWebKit/605.1.15", false, false),
            DeviceType::SmartTv
        );
        assert_eq!(
            device("Mozilla/5.0 (PlayStation; PlayStation 5/2.26) AppleWebKit/605.1.15", false, false),
            DeviceType::Console
        );
        assert_eq!(
            device("Mozilla/5.0 (X11; Linux) Quest/3 OculusBrowser/29", false, false),
            DeviceType::Xr
        );
        assert_eq!(
            device("Mozilla/5.0 (Linux; Android 9; Tesla/2021.44) AppleWebKit/537.36", true, false),
            DeviceType::Embedded
        );
    }

    #[test]
    fn android_without_tablet_tokens_is_mobile() {
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8 Pro) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/119.0.0.0 Mobile Safari/537.36";
        assert_eq!(device(ua, true, false), DeviceType::Mobile);
    }

    #[test]
    fn empty_input_defaults_to_desktop() {
        let facts = classify(&build_cascade().unwrap(), "", false, false);
        assert_eq!(facts.device, DeviceType::Desktop);
        assert!(facts.is_desktop);
    }
}
