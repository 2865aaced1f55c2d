// services/web-dash/src/components/upload.rs
//
// NIRIKSHAN Dashboard - Upload Component
//

use dashkit::upload::CSV_MIME;
use dashkit::{DashError, DashboardController, SelectedFile};
use leptos::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn UploadPanel(
    controller: RwSignal<DashboardController>,
    on_analyze: Callback<()>,
) -> impl IntoView {
    let label = move || controller.with(|c| c.upload().label().to_string());
    let disabled = move || !controller.with(|c| c.can_analyze());

    let on_change = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        spawn_local(async move {
            match read_file(&file).await {
                Ok(selected) => {
                    log::info!("Selected {} ({} bytes)", selected.name(), selected.len());
                    controller.update(|c| c.select_file(selected));
                }
                Err(e) => controller.update(|c| c.record_error(e)),
            }
        });
    };

    view! {
        <section class="panel upload-panel">
            <label class="file-picker">
                <input type="file" accept=format!(".csv,{}", CSV_MIME) on:change=on_change />
                <span class="file-label">{label}</span>
            </label>
            <button
                class="btn btn-analyze"
                disabled=disabled
                on:click=move |_| on_analyze.call(())
            >
                "Analyze"
            </button>
        </section>
    }
}

async fn read_file(file: &File) -> Result<SelectedFile, DashError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| DashError::FileReadError(format!("{}: {:?}", file.name(), e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), bytes))
}
