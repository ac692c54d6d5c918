use std::sync::OnceLock;

use serde::Serialize;

use crate::android::{AndroidFacts, AndroidMatchers};
use crate::browser::{BrowserFacts, BrowserMatchers, IeFacts};
use crate::cascade::Cascade;
use crate::cpu::{self, CpuArchitecture, CpuFacts};
use crate::device::{self, DeviceFacts, DeviceRule};
use crate::engine::{self, EngineFacts, RenderingEngine};
use crate::error::Result;
use crate::ios::{IosFacts, IosMatchers};
use crate::source::{EnvironmentSnapshot, IdentificationSource};

/// All compiled classification tables. Built once, then shared freely across
/// threads; classification itself never allocates a regex.
pub struct Detector {
    ios: IosMatchers,
    android: AndroidMatchers,
    browser: BrowserMatchers,
    engine: Cascade<RenderingEngine>,
    device: Cascade<DeviceRule>,
    cpu: Cascade<CpuArchitecture>,
}

impl Detector {
    /// Compile every matcher table, in parallel. Fails only on a malformed
    /// built-in pattern.
    pub fn new() -> Result<Self> {
        let ((ios, android), ((browser, engine), (device, cpu))) = rayon::join(
            || rayon::join(IosMatchers::compile, AndroidMatchers::compile),
            || {
                rayon::join(
                    || rayon::join(BrowserMatchers::compile, engine::build_cascade),
                    || rayon::join(device::build_cascade, cpu::build_cascade),
                )
            },
        );

        Ok(Self {
            ios: ios?,
            android: android?,
            browser: browser?,
            engine: engine?,
            device: device?,
            cpu: cpu?,
        })
    }

    pub fn ios(&self, user_agent: &str, platform: &str) -> IosFacts {
        self.ios.classify(user_agent, platform)
    }

    pub fn android(&self, user_agent: &str) -> AndroidFacts {
        self.android.classify(user_agent)
    }

    pub fn browser(
        &self,
        user_agent: &str,
        has_chrome_runtime: bool,
        vendor: Option<&str>,
    ) -> BrowserFacts {
        self.browser.classify(user_agent, has_chrome_runtime, vendor)
    }

    pub fn ie(&self, user_agent: &str, app_name: &str) -> IeFacts {
        self.browser.classify_ie(user_agent, app_name)
    }

    pub fn engine(&self, user_agent: &str) -> EngineFacts {
        engine::classify(&self.engine, user_agent)
    }

    /// Device category. `is_android`/`is_ios` gate the ambiguous tablet
    /// model-number rules; [`Profile`] wires these from its own OS facts.
    pub fn device(&self, user_agent: &str, is_android: bool, is_ios: bool) -> DeviceFacts {
        device::classify(&self.device, user_agent, is_android, is_ios)
    }

    pub fn cpu(&self, user_agent: &str, platform: &str) -> CpuFacts {
        cpu::classify(&self.cpu, user_agent, platform)
    }

    /// A lazy per-input view over this detector.
    pub fn profile(&self, snapshot: EnvironmentSnapshot) -> Profile<'_> {
        Profile {
            detector: self,
            snapshot,
            ios: OnceLock::new(),
            android: OnceLock::new(),
            browser: OnceLock::new(),
            ie: OnceLock::new(),
            engine: OnceLock::new(),
            device: OnceLock::new(),
            cpu: OnceLock::new(),
        }
    }

    pub fn profile_from(&self, source: &dyn IdentificationSource) -> Profile<'_> {
        self.profile(source.snapshot())
    }
}

/// One input's classification, computed per domain on first access and
/// memoized. The snapshot is immutable for the profile's lifetime, so every
/// accessor returns the same record no matter how often or in what order the
/// domains are queried.
pub struct Profile<'d> {
    detector: &'d Detector,
    snapshot: EnvironmentSnapshot,
    ios: OnceLock<IosFacts>,
    android: OnceLock<AndroidFacts>,
    browser: OnceLock<BrowserFacts>,
    ie: OnceLock<IeFacts>,
    engine: OnceLock<EngineFacts>,
    device: OnceLock<DeviceFacts>,
    cpu: OnceLock<CpuFacts>,
}

impl Profile<'_> {
    pub fn snapshot(&self) -> &EnvironmentSnapshot {
        &self.snapshot
    }

    pub fn ios(&self) -> IosFacts {
        *self.ios.get_or_init(|| {
            self.detector
                .ios(&self.snapshot.user_agent, &self.snapshot.platform)
        })
    }

    pub fn android(&self) -> AndroidFacts {
        *self
            .android
            .get_or_init(|| self.detector.android(&self.snapshot.user_agent))
    }

    pub fn browser(&self) -> BrowserFacts {
        *self.browser.get_or_init(|| {
            self.detector.browser(
                &self.snapshot.user_agent,
                self.snapshot.has_chrome_runtime,
                self.snapshot.vendor.as_deref(),
            )
        })
    }

    pub fn ie(&self) -> IeFacts {
        *self
            .ie
            .get_or_init(|| self.detector.ie(&self.snapshot.user_agent, &self.snapshot.app_name))
    }

    pub fn engine(&self) -> EngineFacts {
        *self
            .engine
            .get_or_init(|| self.detector.engine(&self.snapshot.user_agent))
    }

    pub fn device(&self) -> DeviceFacts {
        *self.device.get_or_init(|| {
            let is_android = self.android().is_android;
            let is_ios = self.ios().is_ios;
            self.detector
                .device(&self.snapshot.user_agent, is_android, is_ios)
        })
    }

    pub fn cpu(&self) -> CpuFacts {
        *self.cpu.get_or_init(|| {
            self.detector
                .cpu(&self.snapshot.user_agent, &self.snapshot.platform)
        })
    }

    /// The full aggregate record across every domain.
    pub fn facts(&self) -> Facts {
        Facts {
            ios: self.ios(),
            android: self.android(),
            browser: self.browser(),
            ie: self.ie(),
            engine: self.engine(),
            device: self.device(),
            cpu: self.cpu(),
        }
    }
}

/// Aggregate classification record, one field per domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Facts {
    pub ios: IosFacts,
    pub android: AndroidFacts,
    pub browser: BrowserFacts,
    pub ie: IeFacts,
    pub engine: EngineFacts,
    pub device: DeviceFacts,
    pub cpu: CpuFacts,
}
