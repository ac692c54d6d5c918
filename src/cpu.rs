use serde::Serialize;

use crate::cascade::Cascade;
use crate::error::Result;

/// CPU architecture as reported by the identification strings.
///
/// Platforms that misreport their instruction set (macOS on Apple silicon
/// still reports "MacIntel") classify as the misreported value or unknown;
/// the classifier trusts its inputs and makes no hardware-level correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuArchitecture {
    Amd64,
    Arm64,
    Arm,
    Armhf,
    Ia32,
    Sparc,
    Unknown,
}

impl CpuArchitecture {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "amd64" => Some(Self::Amd64),
            "arm64" => Some(Self::Arm64),
            "arm" => Some(Self::Arm),
            "armhf" => Some(Self::Armhf),
            "ia32" => Some(Self::Ia32),
            "sparc" => Some(Self::Sparc),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::Armhf => "armhf",
            Self::Ia32 => "ia32",
            Self::Sparc => "sparc",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuFacts {
    pub architecture: CpuArchitecture,
}

/// Ordered architecture rules, most specific first: a string carrying both a
/// generic "arm" token and an "aarch64" token must resolve to arm64.
pub(crate) fn build_cascade() -> Result<Cascade<CpuArchitecture>> {
    Cascade::build([
        (
            r"\b(?:amd64|x64|x86[-_]?64|wow64|win64)\b",
            CpuArchitecture::Amd64,
        ),
        (
            r"\b(?:aarch64|armv?[89]e?l?|arm_?64)\b",
            CpuArchitecture::Arm64,
        ),
        (r"\barmv[67](?:ht?n?[fl]p?|[hl])\b", CpuArchitecture::Armhf),
        (r"\barm\b", CpuArchitecture::Arm),
        (r"\b(?:ia32|i[3-6]86|x86|win32)\b", CpuArchitecture::Ia32),
        (r"\b(?:sparc|sun4u|sunos)\b", CpuArchitecture::Sparc),
    ])
}

pub(crate) fn classify(
    cascade: &Cascade<CpuArchitecture>,
    user_agent: &str,
    platform: &str,
) -> CpuFacts {
    let combined = format!("{user_agent} {platform}").to_lowercase();
    CpuFacts {
        architecture: *cascade
            .first_match(&combined)
            .unwrap_or(&CpuArchitecture::Unknown),
    }
}
