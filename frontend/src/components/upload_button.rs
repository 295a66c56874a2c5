//! Upload trigger with file count and total size.

use leptos::*;

use crate::format::format_bytes;

/// What the trigger displays and whether it can be activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadSummary {
    pub count: usize,
    pub total_bytes: u64,
    pub is_uploading: bool,
}

impl UploadSummary {
    /// True when there is nothing to send or a request is in flight.
    pub fn is_inert(&self) -> bool {
        self.count == 0 || self.is_uploading
    }

    pub fn label(&self) -> String {
        if self.is_uploading {
            return "Uploading...".to_string();
        }
        let plural = if self.count == 1 { "" } else { "s" };
        format!(
            "Upload {} file{} ({})",
            self.count,
            plural,
            format_bytes(self.total_bytes)
        )
    }
}

#[component]
pub fn UploadButton(
    summary: Signal<UploadSummary>,
    #[prop(into)] on_upload: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="upload-button"
            class:uploading=move || summary.get().is_uploading
            disabled=move || summary.get().is_inert()
            on:click=move |_| {
                if !summary.get_untracked().is_inert() {
                    on_upload.call(());
                }
            }
        >
            <Show when=move || summary.get().is_uploading fallback=|| ()>
                <span class="spinner" aria-hidden="true"></span>
            </Show>
            {move || summary.get().label()}
        </button>
    }
}
