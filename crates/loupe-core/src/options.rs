//! Widget configuration
//!
//! [`Options`] holds plain values and round-trips through serde using the
//! same camelCase keys as the JavaScript API (`enableGrab`, `bgColor`, ...).
//! [`OptionsPatch`] is the shallow-merge form accepted by `config()`.
//! Lifecycle callbacks live separately in [`Hooks`] because closures are not
//! serializable.

use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ZoomError, ZoomResult};

/// Scale the zoomed image to a fixed size, or cap it at a percentage of its
/// natural size
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomSize {
    /// `{ width, height }` in CSS pixels
    Fixed { width: f64, height: f64 },
    /// `"150%"`
    Percent(Percent),
}

/// Percentage given as a string such as `"100%"`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percent(pub f64);

impl TryFrom<String> for Percent {
    type Error = ZoomError;

    fn try_from(value: String) -> ZoomResult<Self> {
        Percent::parse(&value)
    }
}

impl From<Percent> for String {
    fn from(p: Percent) -> String {
        format!("{}%", p.0)
    }
}

impl Percent {
    /// Parse the leading number of `s`, ignoring any trailing unit
    pub fn parse(s: &str) -> ZoomResult<Self> {
        let s = s.trim();
        let end = s
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0))
            })
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        s[..end]
            .parse::<f64>()
            .map(Percent)
            .map_err(|_| ZoomError::InvalidOption(format!("invalid percentage '{}'", s)))
    }
}

/// Configuration values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Allow press-and-hold to grab the zoomed image for extra zoom
    pub enable_grab: bool,
    /// Preload the original images as soon as they are listened to
    pub preload_image: bool,
    /// Close when the browser window is resized
    pub close_on_window_resize: bool,
    /// Transition duration in seconds
    pub transition_duration: f64,
    pub transition_timing_function: String,
    /// Overlay background color
    pub bg_color: String,
    /// Overlay opacity once faded in
    pub bg_opacity: f64,
    /// Added to the fit-to-window scale
    pub scale_base: f64,
    /// Extra scale applied while grabbing
    pub scale_extra: f64,
    /// Scroll distance in pixels that closes the zoomed image
    pub scroll_threshold: f64,
    /// Overlay z-index; the target sits one above it
    pub z_index: i32,
    pub custom_size: Option<CustomSize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enable_grab: true,
            preload_image: false,
            close_on_window_resize: true,
            transition_duration: 0.4,
            transition_timing_function: "cubic-bezier(0.4, 0, 0, 1)".to_string(),
            bg_color: "rgb(255, 255, 255)".to_string(),
            bg_opacity: 1.0,
            scale_base: 0.5,
            scale_extra: 2.5,
            scroll_threshold: 40.0,
            z_index: 998,
            custom_size: None,
        }
    }
}

impl Options {
    /// Shallow-merge a patch; fields absent from the patch keep their value
    pub fn merge(&mut self, patch: OptionsPatch) {
        let OptionsPatch {
            enable_grab,
            preload_image,
            close_on_window_resize,
            transition_duration,
            transition_timing_function,
            bg_color,
            bg_opacity,
            scale_base,
            scale_extra,
            scroll_threshold,
            z_index,
            custom_size,
        } = patch;

        if let Some(v) = enable_grab {
            self.enable_grab = v;
        }
        if let Some(v) = preload_image {
            self.preload_image = v;
        }
        if let Some(v) = close_on_window_resize {
            self.close_on_window_resize = v;
        }
        if let Some(v) = transition_duration {
            self.transition_duration = v;
        }
        if let Some(v) = transition_timing_function {
            self.transition_timing_function = v;
        }
        if let Some(v) = bg_color {
            self.bg_color = v;
        }
        if let Some(v) = bg_opacity {
            self.bg_opacity = v;
        }
        if let Some(v) = scale_base {
            self.scale_base = v;
        }
        if let Some(v) = scale_extra {
            self.scale_extra = v;
        }
        if let Some(v) = scroll_threshold {
            self.scroll_threshold = v;
        }
        if let Some(v) = z_index {
            self.z_index = v;
        }
        if let Some(v) = custom_size {
            self.custom_size = v;
        }
    }

    /// Reject values that would break the transition bookkeeping
    pub fn validate(&self) -> ZoomResult<()> {
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(ZoomError::InvalidOption(format!(
                "transitionDuration must be a non-negative number, got {}",
                self.transition_duration
            )));
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            return Err(ZoomError::InvalidOption(format!(
                "scrollThreshold must be a non-negative number, got {}",
                self.scroll_threshold
            )));
        }
        Ok(())
    }

    /// Transition duration in whole milliseconds
    pub fn transition_duration_ms(&self) -> u32 {
        (self.transition_duration * 1000.0).round().clamp(0.0, u32::MAX as f64) as u32
    }
}

/// Partial options for `config()`; `None` leaves the current value alone.
///
/// `customSize: null` clears a configured custom size.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub enable_grab: Option<bool>,
    pub preload_image: Option<bool>,
    pub close_on_window_resize: Option<bool>,
    pub transition_duration: Option<f64>,
    pub transition_timing_function: Option<String>,
    pub bg_color: Option<String>,
    pub bg_opacity: Option<f64>,
    pub scale_base: Option<f64>,
    pub scale_extra: Option<f64>,
    pub scroll_threshold: Option<f64>,
    pub z_index: Option<i32>,
    #[serde(deserialize_with = "nullable")]
    pub custom_size: Option<Option<CustomSize>>,
}

/// Distinguish an explicit `null` (`Some(None)`) from a missing key (`None`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Lifecycle callback, called with the target element
pub type Hook<E> = Rc<dyn Fn(&E)>;

/// One-shot callback passed to a single `open`/`close`/... call. When given
/// it replaces the matching hook for that call.
pub type Callback<E> = Box<dyn FnOnce(&E)>;

/// Lifecycle events that carry a hook
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    BeforeOpen,
    Open,
    BeforeClose,
    Close,
    BeforeGrab,
    Grab,
    BeforeRelease,
    Release,
    Move,
    ImageLoading,
    ImageLoaded,
}

impl HookKind {
    pub const ALL: [HookKind; 11] = [
        HookKind::BeforeOpen,
        HookKind::Open,
        HookKind::BeforeClose,
        HookKind::Close,
        HookKind::BeforeGrab,
        HookKind::Grab,
        HookKind::BeforeRelease,
        HookKind::Release,
        HookKind::Move,
        HookKind::ImageLoading,
        HookKind::ImageLoaded,
    ];

    /// Option key in the JavaScript API
    pub fn option_name(&self) -> &'static str {
        match self {
            HookKind::BeforeOpen => "onBeforeOpen",
            HookKind::Open => "onOpen",
            HookKind::BeforeClose => "onBeforeClose",
            HookKind::Close => "onClose",
            HookKind::BeforeGrab => "onBeforeGrab",
            HookKind::Grab => "onGrab",
            HookKind::BeforeRelease => "onBeforeRelease",
            HookKind::Release => "onRelease",
            HookKind::Move => "onMove",
            HookKind::ImageLoading => "onImageLoading",
            HookKind::ImageLoaded => "onImageLoaded",
        }
    }

    fn index(&self) -> usize {
        match self {
            HookKind::BeforeOpen => 0,
            HookKind::Open => 1,
            HookKind::BeforeClose => 2,
            HookKind::Close => 3,
            HookKind::BeforeGrab => 4,
            HookKind::Grab => 5,
            HookKind::BeforeRelease => 6,
            HookKind::Release => 7,
            HookKind::Move => 8,
            HookKind::ImageLoading => 9,
            HookKind::ImageLoaded => 10,
        }
    }
}

/// Lifecycle callbacks; unset hooks are no-ops
pub struct Hooks<E> {
    slots: [Option<Hook<E>>; 11],
}

impl<E> Default for Hooks<E> {
    fn default() -> Self {
        Self {
            slots: Default::default(),
        }
    }
}

impl<E> Clone for Hooks<E> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<E> std::fmt::Debug for Hooks<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set: Vec<&str> = HookKind::ALL
            .iter()
            .filter(|k| self.get(**k).is_some())
            .map(|k| k.option_name())
            .collect();
        f.debug_struct("Hooks").field("set", &set).finish()
    }
}

impl<E> Hooks<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn on(mut self, kind: HookKind, hook: impl Fn(&E) + 'static) -> Self {
        self.set(kind, Rc::new(hook));
        self
    }

    pub fn set(&mut self, kind: HookKind, hook: Hook<E>) {
        self.slots[kind.index()] = Some(hook);
    }

    pub fn get(&self, kind: HookKind) -> Option<&Hook<E>> {
        self.slots[kind.index()].as_ref()
    }

    /// Take every hook set in `other`, keep the rest
    pub fn merge(&mut self, other: Hooks<E>) {
        for (slot, hook) in self.slots.iter_mut().zip(other.slots) {
            if hook.is_some() {
                *slot = hook;
            }
        }
    }

    /// Call the hook for `kind`, if any
    pub fn fire(&self, kind: HookKind, el: &E) {
        if let Some(hook) = self.get(kind) {
            hook(el);
        }
    }

    /// Run a per-call callback, or fall back to the hook for `kind`
    pub(crate) fn finish(&self, kind: HookKind, cb: Option<Callback<E>>, el: &E) {
        match cb {
            Some(cb) => cb(el),
            None => self.fire(kind, el),
        }
    }
}
