// services/web-dash/src/lib.rs
//
// NIRIKSHAN browser dashboard - library exports
//

pub mod app;
pub mod components;

use dashkit::config::DEFAULT_BASE_URL;

/// Compile-time override for the analysis service, e.g. `NIRIKSHAN_API_URL=https://api.example.com trunk build`.
pub fn base_url() -> &'static str {
    option_env!("NIRIKSHAN_API_URL").unwrap_or(DEFAULT_BASE_URL)
}

pub fn mount() {
    // Better panic messages in browser console
    console_error_panic_hook::set_once();

    // dashkit logs through tracing; its "log" feature forwards to console_log
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("NIRIKSHAN dashboard starting, analysis service at {}", base_url());

    leptos::mount_to_body(|| {
        leptos::view! { <app::App /> }
    });
}
