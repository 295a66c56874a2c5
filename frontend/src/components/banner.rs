//! Success and error banners derived from the upload status.

use leptos::*;

use crate::types::{UploadPhase, UploadStatus};

/// One banner to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Success,
    Error(String),
}

impl Banner {
    /// Banner for the phase `status` is in, if any.
    pub fn from_status(status: &UploadStatus) -> Option<Banner> {
        match status.phase() {
            UploadPhase::Success => Some(Banner::Success),
            UploadPhase::Failed(message) => Some(Banner::Error(message)),
            UploadPhase::Idle | UploadPhase::Uploading => None,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Banner::Success => "banner banner-success",
            Banner::Error(_) => "banner banner-error",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Banner::Success => "Success!",
            Banner::Error(_) => "Error!",
        }
    }

    fn message(&self) -> String {
        match self {
            Banner::Success => "Files have been uploaded.".to_string(),
            Banner::Error(message) => message.clone(),
        }
    }
}

#[component]
pub fn StatusBanners(status: Signal<UploadStatus>) -> impl IntoView {
    move || {
        Banner::from_status(&status.get()).map(|banner| {
            view! {
                <div class=banner.class() role="alert">
                    <strong>{banner.title()}</strong>
                    <span class="banner-message">{banner.message()}</span>
                </div>
            }
        })
    }
}
