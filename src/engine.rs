use serde::Serialize;

use crate::cascade::Cascade;
use crate::error::Result;

/// Rendering engine, including `Unknown` as a valid terminal classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderingEngine {
    Blink,
    WebKit,
    Gecko,
    Trident,
    #[serde(rename = "EdgeHTML")]
    EdgeHtml,
    Presto,
    #[serde(rename = "unknown")]
    Unknown,
}

impl RenderingEngine {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Blink" => Some(Self::Blink),
            "WebKit" => Some(Self::WebKit),
            "Gecko" => Some(Self::Gecko),
            "Trident" => Some(Self::Trident),
            "EdgeHTML" => Some(Self::EdgeHtml),
            "Presto" => Some(Self::Presto),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blink => "Blink",
            Self::WebKit => "WebKit",
            Self::Gecko => "Gecko",
            Self::Trident => "Trident",
            Self::EdgeHtml => "EdgeHTML",
            Self::Presto => "Presto",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineFacts {
    pub engine: RenderingEngine,
}

/// Ordered engine rules, most specific first. Engines that can be mistaken
/// for one another (legacy Edge vs Chromium Edge, true Gecko vs the "like
/// Gecko" compatibility phrase, WebKit vs Blink) are disambiguated by
/// putting the exclusionary pattern earlier.
pub(crate) fn build_cascade() -> Result<Cascade<RenderingEngine>> {
    Cascade::build([
        ("presto", RenderingEngine::Presto),
        // Legacy Edge reports Edge/NN; the shorter Edg/ token is Chromium
        // Edge and must be absent.
        (r"^(?=.*\bedge/\d)(?!.*\bedg/\d)", RenderingEngine::EdgeHtml),
        // Blink kept WebKit's frozen 537.36 token alongside a Chrome marker.
        (
            r"^(?=.*webkit/537\.36)(?=.*chrome/)(?!.*edge/)",
            RenderingEngine::Blink,
        ),
        ("trident", RenderingEngine::Trident),
        (r"^(?=.*gecko)(?!.*like gecko)", RenderingEngine::Gecko),
        (r"^(?=.*webkit)(?!.*chrome)", RenderingEngine::WebKit),
    ])
}

pub(crate) fn classify(cascade: &Cascade<RenderingEngine>, user_agent: &str) -> EngineFacts {
    EngineFacts {
        engine: *cascade
            .first_match(user_agent)
            .unwrap_or(&RenderingEngine::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(ua: &str) -> RenderingEngine {
        classify(&build_cascade().unwrap(), ua).engine
    }

    #[test]
    fn blink_in_chrome_and_chromium_descendants() {
        let chrome = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
        assert_eq!(engine(chrome), RenderingEngine::Blink);

        let edg = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 Edg/119.0.0.0";
        assert_eq!(engine(edg), RenderingEngine::Blink);

        let opera = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 OPR/105.0.0.0";
        assert_eq!(engine(opera), RenderingEngine::Blink);
    }

    #[test]
    fn webkit_in_safari() {
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/17.1 Safari/605.1.15";
        assert_eq!(engine(mac), RenderingEngine::WebKit);

        let ios = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
        assert_eq!(engine(ios), RenderingEngine::WebKit);
    }

    #[test]
    fn like_gecko_is_not_gecko() {
        let firefox =
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0";
        assert_eq!(engine(firefox), RenderingEngine::Gecko);

        let chrome = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
        assert_ne!(engine(chrome), RenderingEngine::Gecko);
    }

    #[test]
    fn legacy_edge_beats_blink_despite_chrome_token() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/64.0.3282.140 Safari/537.36 Edge/18.17763";
        assert_eq!(engine(ua), RenderingEngine::EdgeHtml);
    }

    #[test]
    fn trident_and_presto() {
        assert_eq!(
            engine("Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)"),
            RenderingEngine::Trident
        );
        assert_eq!(
            engine("Opera/9.80 (Windows NT 6.1) Presto/2.12.388 Version/12.18"),
            RenderingEngine::Presto
        );
    }

    #[test]
    fn empty_and_garbage_are_unknown() {
        assert_eq!(engine(""), RenderingEngine::Unknown);
        assert_eq!(engine("curl/8.4.0"), RenderingEngine::Unknown);
    }
}
