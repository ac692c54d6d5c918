mod android;
mod browser;
mod capability;
mod cascade;
mod client_hints;
mod cpu;
mod detector;
mod device;
mod engine;
mod error;
mod ios;
mod literal;
mod source;
mod version;

pub use android::AndroidFacts;
pub use browser::{BrowserFacts, IeFacts};
pub use capability::{
    CapabilityFacts, CapabilityProbe, DomFeatureFacts, InertProbe, PixelRatioFacts,
};
pub use client_hints::{
    classify_client_hints, classify_client_hints_basic, BrandVersion, ClientHintsData,
    ClientHintsFacts, ExtendedIdentificationSource, HintRequestError, HIGH_ENTROPY_HINTS,
};
pub use cpu::{CpuArchitecture, CpuFacts};
pub use detector::{Detector, Facts, Profile};
pub use device::{DeviceFacts, DeviceType};
pub use engine::{EngineFacts, RenderingEngine};
pub use error::{Error, Result};
pub use ios::IosFacts;
pub use source::{EnvironmentSnapshot, IdentificationSource};
pub use version::{version_eq, version_ge, version_gt, version_le, version_lt, Version};
