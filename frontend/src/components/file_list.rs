//! Pending-file list with per-item removal.

use leptos::*;
use web_sys::File;

use crate::format::format_bytes;
use crate::types::{FileHandle, FileId, StagedFile};

#[component]
pub fn FileList(
    files: Signal<Vec<StagedFile<File>>>,
    #[prop(into)] on_remove: Callback<FileId>,
) -> impl IntoView {
    view! {
        <div class="file-list">
            <h2 class="file-list-title">"Files to Upload"</h2>
            <ul class="file-list-items">
                <For
                    each=move || files.get()
                    key=|staged| staged.id.clone()
                    children=move |staged| {
                        let name = FileHandle::name(&staged.file);
                        let size = format_bytes(FileHandle::size(&staged.file));
                        let id = staged.id;
                        view! {
                            <li class="file-item">
                                <span class="file-icon">"📄"</span>
                                <div class="file-meta">
                                    <p class="file-name" title=name.clone()>{name.clone()}</p>
                                    <p class="file-size">{size}</p>
                                </div>
                                <button
                                    class="file-remove"
                                    aria-label=format!("Remove {}", name)
                                    on:click=move |_| on_remove.call(id.clone())
                                >
                                    "🗑"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
