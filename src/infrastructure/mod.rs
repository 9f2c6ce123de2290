//! Browser-facing adapters: HTTP, storage, document, speech, media queries, timers.

pub mod api;
pub mod document;
pub mod focus_trap;
pub mod http;
pub mod media;
pub mod scheduler;
pub mod services;
pub mod speech;
pub mod storage;
