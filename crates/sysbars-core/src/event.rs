use serde::{Deserialize, Serialize};

use crate::inset::{DisplayId, InsetSourceControl, InsetType, InsetsState};

/// A platform notification about a display.
///
/// Platform glue translates its raw callbacks into these variants.
/// Event scripts replayed by the CLI are JSON lines of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DisplayEvent {
    /// A display was connected.
    Added { display: DisplayId },

    /// A display was disconnected.
    Removed { display: DisplayId },

    /// The display's insets state changed.
    InsetsChanged {
        display: DisplayId,
        state: InsetsState,
    },

    /// The display's inset source controls changed.
    ControlsChanged {
        display: DisplayId,
        controls: Vec<InsetSourceControl>,
    },

    /// A different window took input focus on the display.
    FocusChanged {
        display: DisplayId,
        #[serde(default)]
        component: Option<String>,
    },

    /// An explicit request to show inset types.
    Show {
        display: DisplayId,
        types: Vec<InsetType>,
    },

    /// An explicit request to hide inset types.
    Hide {
        display: DisplayId,
        types: Vec<InsetType>,
    },

    /// The bar visibility policy was reloaded.
    PolicyChanged,
}

impl DisplayEvent {
    /// Returns the display this event targets, if it targets one.
    pub fn display(&self) -> Option<DisplayId> {
        match self {
            Self::Added { display }
            | Self::Removed { display }
            | Self::InsetsChanged { display, .. }
            | Self::ControlsChanged { display, .. }
            | Self::FocusChanged { display, .. }
            | Self::Show { display, .. }
            | Self::Hide { display, .. } => Some(*display),
            Self::PolicyChanged => None,
        }
    }

    /// Parses one line of an event script.
    ///
    /// Blank lines and lines starting with `#` yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        serde_json::from_str(line)
            .map(Some)
            .map_err(|e| e.to_string())
    }
}
