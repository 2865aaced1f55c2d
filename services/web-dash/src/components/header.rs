// services/web-dash/src/components/header.rs
//
// NIRIKSHAN Dashboard - Header Component
//

use dashkit::{DashboardController, Phase};
use leptos::*;

#[component]
pub fn Header(controller: RwSignal<DashboardController>) -> impl IntoView {
    let phase = move || controller.with(|c| c.phase());
    let toggle_label = move || controller.with(|c| c.theme().toggle_label());

    let status_text = move || match phase() {
        Phase::Idle => "Waiting for data",
        Phase::Loading => "Analyzing",
        Phase::Ready => "Report ready",
        Phase::Failed => "Last analysis failed",
    };
    let status_class = move || match phase() {
        Phase::Idle => "status-idle",
        Phase::Loading => "status-loading",
        Phase::Ready => "status-ready",
        Phase::Failed => "status-failed",
    };

    view! {
        <header class="header">
            <div class="header-brand">
                <h1 class="header-title">"NIRIKSHAN"</h1>
                <span class="header-subtitle">"Upload a dataset, get an instant dashboard"</span>
            </div>

            <div class="header-status">
                <span class=move || format!("phase-indicator {}", status_class())>{status_text}</span>
            </div>

            <div class="header-actions">
                <button
                    class="btn btn-theme"
                    on:click=move |_| controller.update(|c| {
                        c.toggle_theme();
                    })
                >
                    {toggle_label}
                </button>
            </div>
        </header>
    }
}
