// services/web-dash/src/components/error.rs
//
// NIRIKSHAN Dashboard - Error Banner Component
//

use dashkit::DashboardController;
use leptos::*;

#[component]
pub fn ErrorBanner(controller: RwSignal<DashboardController>) -> impl IntoView {
    // Hidden while loading; a new attempt clears it anyway.
    let message = move || {
        controller.with(|c| {
            if c.is_loading() {
                None
            } else {
                c.error().map(|e| e.to_string())
            }
        })
    };

    view! {
        <Show when=move || message().is_some() fallback=|| ()>
            <div class="error-banner" role="alert">
                <span class="error-icon">"✗"</span>
                <span class="error-message">{move || message().unwrap_or_default()}</span>
                <button
                    class="btn btn-dismiss"
                    on:click=move |_| controller.update(|c| c.dismiss_error())
                >
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}
