//! Drop/select surface.
//!
//! Accepts files by drag & drop or through the native file dialog and
//! forwards them untouched.

use leptos::*;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement, MouseEvent};

/// Drag gestures the surface reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragGesture {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragGesture {
    /// Highlight state after this gesture.
    pub fn next_highlight(self, current: bool) -> bool {
        match self {
            DragGesture::Enter => true,
            DragGesture::Over => current,
            DragGesture::Leave | DragGesture::Drop => false,
        }
    }
}

fn collect_files(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn Dropzone(
    /// Called with every file the user supplied.
    #[prop(into)]
    on_files: Callback<Vec<File>>,
) -> impl IntoView {
    let (is_dragging, set_is_dragging) = create_signal(false);
    let file_input = create_node_ref::<html::Input>();

    let on_drag = move |gesture: DragGesture, ev: &DragEvent| {
        // Keeps the browser from navigating to the dropped file.
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.update(|dragging| *dragging = gesture.next_highlight(*dragging));
    };

    let on_drop = move |ev: DragEvent| {
        on_drag(DragGesture::Drop, &ev);

        let Some(transfer) = ev.data_transfer() else {
            return;
        };
        let files = transfer.files().map(|list| collect_files(&list)).unwrap_or_default();
        if !files.is_empty() {
            log::info!("{} file(s) dropped", files.len());
            on_files.call(files);
            if let Err(e) = transfer.clear_data() {
                log::warn!("Failed to clear drag data: {:?}", e);
            }
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = input.files().map(|list| collect_files(&list)).unwrap_or_default();
        if !files.is_empty() {
            log::info!("{} file(s) selected", files.len());
            on_files.call(files);
        }
        // Allows picking the same file again.
        input.set_value("");
    };

    let open_dialog = move |_: MouseEvent| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    view! {
        <div
            class="dropzone"
            class:dragging=move || is_dragging.get()
            on:dragenter=move |ev: DragEvent| on_drag(DragGesture::Enter, &ev)
            on:dragleave=move |ev: DragEvent| on_drag(DragGesture::Leave, &ev)
            on:dragover=move |ev: DragEvent| on_drag(DragGesture::Over, &ev)
            on:drop=on_drop
            on:click=open_dialog
        >
            <div class="dropzone-icon">"📤"</div>
            <p class="dropzone-text">
                <span class="dropzone-strong">"Click to upload"</span>
                " or drag and drop"
            </p>
            <p class="dropzone-hint">"Any file type, up to you"</p>
            <input
                type="file"
                multiple=true
                class="hidden"
                node_ref=file_input
                on:click=|ev: MouseEvent| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>
    }
}
