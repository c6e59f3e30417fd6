//! Custom components.

use crate::error::WebResult;
use hunter_api::response::progress_percent;
use leptos::prelude::*;

#[component]
pub fn ProgressBar(value: u64, max: u64) -> impl IntoView {
    let percent = progress_percent(value, max);
    view! {
        <progress class="progress is-info" value=percent.to_string() max="100">
            {format!("{percent}%")}
        </progress>
    }
}

/// Feedback for something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn from_outcome<T>(outcome: &WebResult<T>, success: &str) -> Self {
        match outcome {
            Ok(_) => Notice::Success(success.to_string()),
            Err(err) => Notice::Failure(err.message.clone()),
        }
    }
}

#[component]
pub fn NoticeView(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        let (class, text) = match notice.get()? {
            Notice::Success(text) => ("notification is-success is-light", text),
            Notice::Failure(text) => ("notification is-danger is-light", text),
        };
        Some(view! {
            <div class=class>
                <button class="delete" on:click=move |_ev| notice.set(None)></button>
                {text}
            </div>
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::WebError;

    #[test]
    fn notice_reflects_outcome() {
        let ok: WebResult<()> = Ok(());
        assert_eq!(
            Notice::from_outcome(&ok, "Checked in"),
            Notice::Success("Checked in".to_string())
        );
        let failed: WebResult<()> = Err(WebError::status(500, "500 Internal Server Error - boom"));
        assert_eq!(
            Notice::from_outcome(&failed, "Checked in"),
            Notice::Failure("500 Internal Server Error - boom".to_string())
        );
    }
}
