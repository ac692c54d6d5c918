use serde::Serialize;

/// Environment feature probes the core consumes but never implements.
///
/// Each check is an independent boolean; the property probes back the
/// vendor-prefix fallback tables below. Probing is environment-specific
/// (a real browser adapter, a test double, or [`InertProbe`]).
pub trait CapabilityProbe {
    fn has_history_api(&self) -> bool;
    fn has_touch_input(&self) -> bool;
    fn has_fullscreen_api(&self) -> bool;
    fn has_canvas_2d(&self) -> bool;
    fn has_webgl(&self) -> bool;
    /// Whether a CSS style property of this name exists on an element.
    fn has_style_property(&self, name: &str) -> bool;
    /// Whether a property of this name exists on the document object.
    fn has_document_property(&self, name: &str) -> bool;
    /// Device pixel ratio, when the environment reports one.
    fn device_pixel_ratio(&self) -> Option<f64>;
}

/// All-false probe standing in for a missing hosting environment, so every
/// environment-dependent entry point stays callable (server-side rendering,
/// unit tests) with deterministic inert output.
pub struct InertProbe;

impl CapabilityProbe for InertProbe {
    fn has_history_api(&self) -> bool {
        false
    }
    fn has_touch_input(&self) -> bool {
        false
    }
    fn has_fullscreen_api(&self) -> bool {
        false
    }
    fn has_canvas_2d(&self) -> bool {
        false
    }
    fn has_webgl(&self) -> bool {
        false
    }
    fn has_style_property(&self, _name: &str) -> bool {
        false
    }
    fn has_document_property(&self, _name: &str) -> bool {
        false
    }
    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CapabilityFacts {
    pub has_history: bool,
    /// Mouse-move events are assumed wherever the device classified as
    /// desktop.
    pub has_mouse_move: bool,
    pub has_touch: bool,
    pub has_fullscreen: bool,
    pub has_canvas: bool,
    pub has_webgl: bool,
}

impl CapabilityFacts {
    /// Assemble independently probed booleans into the record.
    pub fn assemble(
        has_history: bool,
        is_desktop: bool,
        has_touch: bool,
        has_fullscreen: bool,
        has_canvas: bool,
        has_webgl: bool,
    ) -> Self {
        Self {
            has_history,
            has_mouse_move: is_desktop,
            has_touch,
            has_fullscreen,
            has_canvas,
            has_webgl,
        }
    }

    pub fn from_probe(probe: &dyn CapabilityProbe, is_desktop: bool) -> Self {
        Self::assemble(
            probe.has_history_api(),
            is_desktop,
            probe.has_touch_input(),
            probe.has_fullscreen_api(),
            probe.has_canvas_2d(),
            probe.has_webgl(),
        )
    }
}

/// Transition-end event name discovery table: style property → event name,
/// tried in order, first present property wins.
const TRANSITION_EVENTS: [(&str, &str); 4] = [
    ("transition", "transitionend"),
    ("OTransition", "oTransitionEnd"),
    ("MozTransition", "transitionend"),
    ("WebkitTransition", "webkitTransitionEnd"),
];

/// Visibility API discovery table: document hidden-property → change event,
/// standard first, then moz → ms → webkit.
const VISIBILITY_VARIANTS: [(&str, &str); 4] = [
    ("hidden", "visibilitychange"),
    ("mozHidden", "mozvisibilitychange"),
    ("msHidden", "msvisibilitychange"),
    ("webkitHidden", "webkitvisibilitychange"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DomFeatureFacts {
    pub transition_end: Option<&'static str>,
    pub visibility_change_event: Option<&'static str>,
    pub hidden_property: Option<&'static str>,
}

impl DomFeatureFacts {
    pub fn from_probe(probe: &dyn CapabilityProbe) -> Self {
        let transition_end = TRANSITION_EVENTS
            .iter()
            .find(|(prop, _)| probe.has_style_property(prop))
            .map(|(_, event)| *event);
        let visibility = VISIBILITY_VARIANTS
            .iter()
            .find(|(prop, _)| probe.has_document_property(prop));

        Self {
            transition_end,
            visibility_change_event: visibility.map(|(_, event)| *event),
            hidden_property: visibility.map(|(prop, _)| *prop),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRatioFacts {
    pub pixel_ratio: f64,
    pub is_retina: bool,
}

impl PixelRatioFacts {
    pub fn from_ratio(pixel_ratio: f64) -> Self {
        Self {
            pixel_ratio,
            is_retina: pixel_ratio > 1.0,
        }
    }

    /// An environment that reports no ratio counts as 1.0.
    pub fn from_probe(probe: &dyn CapabilityProbe) -> Self {
        Self::from_ratio(probe.device_pixel_ratio().unwrap_or(1.0))
    }
}
