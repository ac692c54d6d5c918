use serde::{Deserialize, Serialize};

/// The high-entropy hint names requested from an extended source.
pub const HIGH_ENTROPY_HINTS: [&str; 8] = [
    "architecture",
    "bitness",
    "brands",
    "fullVersionList",
    "mobile",
    "model",
    "platform",
    "platformVersion",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandVersion {
    pub brand: String,
    pub version: String,
}

/// Structured client-hints record. Field names follow the UA-Client-Hints
/// wire format; low-entropy sources fill only brands/mobile/platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientHintsData {
    pub brands: Option<Vec<BrandVersion>>,
    pub mobile: Option<bool>,
    pub platform: Option<String>,
    pub architecture: Option<String>,
    pub bitness: Option<String>,
    pub model: Option<String>,
    pub platform_version: Option<String>,
    pub full_version_list: Option<Vec<BrandVersion>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientHintsFacts {
    pub supported: bool,
    pub data: Option<ClientHintsData>,
}

impl ClientHintsFacts {
    fn unsupported() -> Self {
        Self {
            supported: false,
            data: None,
        }
    }
}

/// Why a high-entropy request did not produce data. Both outcomes degrade to
/// the low-entropy subset; neither reaches the caller as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HintRequestError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("unsupported operation")]
    Unsupported,
}

/// Permission-gated richer identification source. `low_entropy` must always
/// succeed; `high_entropy` may suspend on a permission prompt and may fail.
pub trait ExtendedIdentificationSource {
    fn low_entropy(&self) -> ClientHintsData;

    fn high_entropy(
        &self,
        hints: &[&str],
    ) -> impl std::future::Future<Output = Result<ClientHintsData, HintRequestError>> + Send;
}

/// Synchronous classification from the low-entropy subset only.
pub fn classify_client_hints_basic<S: ExtendedIdentificationSource>(
    source: Option<&S>,
) -> ClientHintsFacts {
    match source {
        None => ClientHintsFacts::unsupported(),
        Some(s) => ClientHintsFacts {
            supported: true,
            data: Some(s.low_entropy()),
        },
    }
}

/// Asynchronous classification requesting the high-entropy set. Rejection or
/// an unsupported operation falls back to the low-entropy subset; the
/// fallback is a successful terminal state, never an error.
pub async fn classify_client_hints<S: ExtendedIdentificationSource>(
    source: Option<&S>,
) -> ClientHintsFacts {
    let s = match source {
        None => return ClientHintsFacts::unsupported(),
        Some(s) => s,
    };
    let data = match s.high_entropy(&HIGH_ENTROPY_HINTS).await {
        Ok(data) => data,
        Err(_) => s.low_entropy(),
    };
    ClientHintsFacts {
        supported: true,
        data: Some(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        grant: bool,
    }

    impl ExtendedIdentificationSource for FakeSource {
        fn low_entropy(&self) -> ClientHintsData {
            ClientHintsData {
                brands: Some(vec![BrandVersion {
                    brand: "Chromium".into(),
                    version: "119".into(),
                }]),
                mobile: Some(false),
                platform: Some("Windows".into()),
                ..ClientHintsData::default()
            }
        }

        async fn high_entropy(
            &self,
            hints: &[&str],
        ) -> Result<ClientHintsData, HintRequestError> {
            assert_eq!(hints, &HIGH_ENTROPY_HINTS[..]);
            if !self.grant {
                return Err(HintRequestError::PermissionDenied);
            }
            Ok(ClientHintsData {
                architecture: Some("x86".into()),
                bitness: Some("64".into()),
                platform_version: Some("15.0.0".into()),
                ..self.low_entropy()
            })
        }
    }

    #[tokio::test]
    async fn grants_yield_high_entropy_data() {
        let facts = classify_client_hints(Some(&FakeSource { grant: true })).await;
        assert!(facts.supported);
        let data = facts.data.unwrap();
        assert_eq!(data.architecture.as_deref(), Some("x86"));
        assert_eq!(data.platform.as_deref(), Some("Windows"));
    }

    #[tokio::test]
    async fn denial_falls_back_to_basic_subset() {
        let facts = classify_client_hints(Some(&FakeSource { grant: false })).await;
        assert!(facts.supported);
        let data = facts.data.unwrap();
        assert_eq!(data.architecture, None);
        assert_eq!(data.platform.as_deref(), Some("Windows"));
    }

    #[tokio::test]
    async fn absent_source_is_unsupported_not_an_error() {
        let facts = classify_client_hints(None::<&FakeSource>).await;
        assert!(!facts.supported);
        assert!(facts.data.is_none());
    }

    #[test]
    fn basic_classification_is_synchronous() {
        let facts = classify_client_hints_basic(Some(&FakeSource { grant: true }));
        assert!(facts.supported);
        assert_eq!(facts.data.unwrap().architecture, None);
    }

    #[test]
    fn wire_format_round_trip() {
        let json = r#"{"brands":[{"brand":"Chromium","version":"119"}],
            "mobile":true,"platform":"Android","platformVersion":"14.0.0",
            "fullVersionList":[{"brand":"Chromium","version":"119.0.6045.66"}]}"#;
        let data: ClientHintsData = serde_json::from_str(json).unwrap();
        assert_eq!(data.mobile, Some(true));
        assert_eq!(data.platform_version.as_deref(), Some("14.0.0"));
        assert_eq!(
            data.full_version_list.as_ref().unwrap()[0].version,
            "119.0.6045.66"
        );
    }
}
