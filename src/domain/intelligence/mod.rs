//! Competitive-intelligence payloads and the overview aggregate built from them.

pub mod dto;
pub mod overview;

pub use dto::*;
pub use overview::*;
