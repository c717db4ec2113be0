//! DocSearch Desktop — Dioxus-powered search box with live suggestions.

use std::sync::Mutex;

use dioxus::prelude::*;

mod app;
mod search;
mod state;

use app::App;
use state::DesktopState;

/// Pre-runtime storage — loaded before Dioxus launches, consumed on first render.
pub static INITIAL_STATE: Mutex<Option<DesktopState>> = Mutex::new(None);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docsearch=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    // Load config and build the HTTP client before the UI exists
    let initial_state = DesktopState::load().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    *INITIAL_STATE.lock().unwrap() = Some(initial_state);

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_disable_context_menu(true)
                    .with_window(
                        WindowBuilder::new()
                            .with_title("DocSearch")
                            .with_inner_size(LogicalSize::new(720.0, 560.0))
                            .with_min_inner_size(LogicalSize::new(420.0, 320.0))
                            .with_resizable(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
