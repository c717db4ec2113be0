//! Root application component.

use dioxus::prelude::*;

use crate::search::SearchPanel;
use crate::state::*;
use crate::INITIAL_STATE;

static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    // Move the pre-launch state into the signal exactly once
    use_hook(|| {
        let initial = INITIAL_STATE.lock().ok().and_then(|mut s| s.take());
        if let Some(state) = initial {
            *CORE.write() = Some(state);
        }
    });

    // Mirror every panel change the widget publishes into PANEL
    use_future(|| async {
        let Some(widget) = widget() else {
            return;
        };
        let mut panel_rx = widget.subscribe();
        while panel_rx.changed().await.is_ok() {
            let panel = panel_rx.borrow_and_update().clone();
            *PANEL.write() = panel;
        }
    });

    rsx! {
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",

            header {
                class: "titlebar",
                span { class: "titlebar-title", "DocSearch" }
                EndpointBadge {}
            }

            main {
                class: "content-area",
                SearchPanel {}
            }
        }
    }
}

/// Shows which endpoint searches go to
#[component]
fn EndpointBadge() -> Element {
    let core = CORE.read();
    let endpoint = core.as_ref().map(|s| s.config.endpoint.clone()).unwrap_or_default();

    rsx! {
        span { class: "titlebar-endpoint", "{endpoint}" }
    }
}
