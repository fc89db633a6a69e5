//! Inset types and the per-display state derived from them.
//!
//! An inset is a region along a display edge (status bar, navigation
//! bar, IME, ...) that content must avoid. [`InsetType`] names a single
//! kind; [`InsetTypes`] is the bitmask form used on the wire and in
//! policy decisions.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::Rect;

/// Stable per-display identity assigned by the platform.
pub type DisplayId = i32;

/// A single kind of inset.
///
/// Serializes as its snake_case name. Deserializing goes through
/// [`InsetType::from_name`], so hand-written rules and scripts may use
/// any case and `-` in place of `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsetType {
    StatusBars,
    NavigationBars,
    CaptionBar,
    /// The input method window. Owned by the input framework; bar
    /// policy never shows or hides it.
    Ime,
    SystemGestures,
    MandatorySystemGestures,
    TappableElement,
    DisplayCutout,
}

const TYPE_NAMES: [&str; 8] = [
    "status_bars",
    "navigation_bars",
    "caption_bar",
    "ime",
    "system_gestures",
    "mandatory_system_gestures",
    "tappable_element",
    "display_cutout",
];

impl InsetType {
    /// Every inset type, in bit order.
    pub const ALL: [InsetType; 8] = [
        Self::StatusBars,
        Self::NavigationBars,
        Self::CaptionBar,
        Self::Ime,
        Self::SystemGestures,
        Self::MandatorySystemGestures,
        Self::TappableElement,
        Self::DisplayCutout,
    ];

    /// Returns the single-bit mask for this type.
    pub fn mask(self) -> InsetTypes {
        match self {
            Self::StatusBars => InsetTypes::STATUS_BARS,
            Self::NavigationBars => InsetTypes::NAVIGATION_BARS,
            Self::CaptionBar => InsetTypes::CAPTION_BAR,
            Self::Ime => InsetTypes::IME,
            Self::SystemGestures => InsetTypes::SYSTEM_GESTURES,
            Self::MandatorySystemGestures => InsetTypes::MANDATORY_SYSTEM_GESTURES,
            Self::TappableElement => InsetTypes::TAPPABLE_ELEMENT,
            Self::DisplayCutout => InsetTypes::DISPLAY_CUTOUT,
        }
    }

    /// The snake_case name used in config files and event scripts.
    pub fn name(self) -> &'static str {
        TYPE_NAMES[self.mask().bits().trailing_zeros() as usize]
    }

    /// Parses a type name (case-insensitive, `-` accepted for `_`).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|t| t.name() == normalized)
    }
}

impl<'de> Deserialize<'de> for InsetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).ok_or_else(|| de::Error::unknown_variant(&name, &TYPE_NAMES))
    }
}

bitflags! {
    /// A set of inset types encoded as the platform's public type bits.
    /// Serializes as the raw integer mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InsetTypes: u32 {
        const STATUS_BARS = 1 << 0;
        const NAVIGATION_BARS = 1 << 1;
        const CAPTION_BAR = 1 << 2;
        const IME = 1 << 3;
        const SYSTEM_GESTURES = 1 << 4;
        const MANDATORY_SYSTEM_GESTURES = 1 << 5;
        const TAPPABLE_ELEMENT = 1 << 6;
        const DISPLAY_CUTOUT = 1 << 7;

        /// Status, navigation, and caption bars.
        const SYSTEM_BARS = Self::STATUS_BARS.bits() | Self::NAVIGATION_BARS.bits() | Self::CAPTION_BAR.bits();
    }
}

impl InsetTypes {
    /// Returns the set with the IME bit cleared.
    pub fn without_ime(self) -> Self {
        self.difference(Self::IME)
    }

    /// Iterates over the individual inset types in this set.
    pub fn iter_types(self) -> impl Iterator<Item = InsetType> {
        InsetType::ALL
            .into_iter()
            .filter(move |t| self.contains(t.mask()))
    }

    /// Builds a mask from a list of types.
    pub fn from_types<'a>(types: impl IntoIterator<Item = &'a InsetType>) -> Self {
        types
            .into_iter()
            .fold(Self::empty(), |acc, t| acc | t.mask())
    }
}

impl Serialize for InsetTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl From<InsetType> for InsetTypes {
    fn from(t: InsetType) -> Self {
        t.mask()
    }
}

/// Geometry and visibility of one inset source on a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsetSource {
    pub frame: Rect,
    pub visible: bool,
}

impl Default for InsetSource {
    fn default() -> Self {
        Self {
            frame: Rect::default(),
            visible: true,
        }
    }
}

/// Snapshot of every inset source on a display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsetsState {
    pub sources: BTreeMap<InsetType, InsetSource>,
}

impl InsetsState {
    /// Returns the source for `inset_type`, if the platform reported one.
    pub fn source(&self, inset_type: InsetType) -> Option<&InsetSource> {
        self.sources.get(&inset_type)
    }

    /// Whether the source is visible. Unreported sources count as visible.
    pub fn is_visible(&self, inset_type: InsetType) -> bool {
        self.source(inset_type).is_none_or(|s| s.visible)
    }

    /// Sets the visibility of every type in `types`, creating sources
    /// that have not been reported yet.
    pub fn set_visible(&mut self, types: InsetTypes, visible: bool) {
        for t in types.iter_types() {
            self.sources.entry(t).or_default().visible = visible;
        }
    }
}

/// Control over one inset source's surface, handed to the display by
/// the window manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsetSourceControl {
    pub inset_type: InsetType,
    /// Opaque handle of the surface leash, if the control carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leash: Option<u64>,
    #[serde(default)]
    pub surface_position: (i32, i32),
}

impl InsetSourceControl {
    pub fn new(inset_type: InsetType) -> Self {
        Self {
            inset_type,
            leash: None,
            surface_position: (0, 0),
        }
    }
}

/// The visibility a display asks the window manager to apply, per type.
///
/// Types that were never requested are absent and keep whatever the
/// platform decides. The IME type is never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestedVisibilities {
    requested: BTreeMap<InsetType, bool>,
}

impl RequestedVisibilities {
    /// Records the requested visibility for every non-IME type in `types`.
    pub fn set(&mut self, types: InsetTypes, visible: bool) {
        for t in types.without_ime().iter_types() {
            self.requested.insert(t, visible);
        }
    }

    /// Returns the requested visibility for `inset_type`, if any.
    pub fn visibility(&self, inset_type: InsetType) -> Option<bool> {
        self.requested.get(&inset_type).copied()
    }

    /// Types currently requested visible.
    pub fn visible_types(&self) -> InsetTypes {
        self.collect(true)
    }

    /// Types currently requested hidden.
    pub fn hidden_types(&self) -> InsetTypes {
        self.collect(false)
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }

    fn collect(&self, visible: bool) -> InsetTypes {
        self.requested
            .iter()
            .filter(|&(_, &v)| v == visible)
            .fold(InsetTypes::empty(), |acc, (t, _)| acc | t.mask())
    }
}
