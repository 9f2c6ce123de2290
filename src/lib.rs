use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

#[macro_use]
pub mod macros;

pub mod app;
pub mod application;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;

/// Installs logging, then mounts the dashboard.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::for_build());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(LogComponent::Presentation("Initialize"), "Mounting dashboard");

    leptos::mount_to_body(app::App);
}
