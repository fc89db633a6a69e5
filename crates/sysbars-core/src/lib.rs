pub mod channel;
pub mod config;
pub mod event;
pub mod inset;
pub mod log;
pub mod policy;
pub mod rect;

pub use channel::{ChannelResult, InsetsCallbacks, InsetsChannel};
pub use event::DisplayEvent;
pub use inset::{
    DisplayId, InsetSource, InsetSourceControl, InsetType, InsetTypes, InsetsState,
    RequestedVisibilities,
};
pub use policy::{BarVisibilityPolicy, RulePolicy, SharedPolicy, VisibilityDecision};
pub use rect::Rect;
