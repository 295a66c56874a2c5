//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <header class="hero">
            <h1>"Upload Your Files"</h1>
            <p class="subtitle">
                "Drag & drop files or click to select files from your device."
            </p>
        </header>
    }
}
