//! Accessibility preferences and the assistive-technology announcement queue.

pub mod announcements;
pub mod preferences;

pub use announcements::*;
pub use preferences::*;
