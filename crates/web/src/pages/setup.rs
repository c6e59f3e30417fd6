//! Creating a new hunter or continuing as an existing one.

use crate::{
    backend::Backend,
    context::get_client,
    error::{WebError, WebResult},
};
use hunter_api::{request as req, HunterId};
use leptos::prelude::*;
use send_wrapper::SendWrapper;

pub const DEFAULT_TITLE: &str = "Shadow Hunter";

/// A hunter that can be picked without creating a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHunter {
    pub id: HunterId,
    pub name: String,
    pub level: u32,
}

impl KnownHunter {
    pub fn label(&self) -> String {
        format!("{} • Lv {}", self.name, self.level)
    }
}

/// Creates a hunter and returns the id the backend gave it.
pub async fn create_hunter<B: Backend>(
    backend: &B,
    name: &str,
    title: &str,
) -> WebResult<HunterId> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WebError::validation("Enter a name"));
    }

    let new_hunter = req::NewHunter {
        name: name.into(),
        title: title.trim().into(),
    };
    backend
        .create_hunter(&new_hunter)
        .await?
        .and_then(|profile| profile.id)
        .ok_or_else(|| WebError::missing("The backend did not return an id for the new hunter"))
}

/// The hunters that already exist. Failing to list them isn't worth bothering the user with.
pub async fn existing_hunters<B: Backend>(backend: &B) -> Vec<KnownHunter> {
    match backend.list_hunters().await {
        Ok(hunters) => hunters
            .unwrap_or_default()
            .into_iter()
            .filter_map(|hunter| {
                Some(KnownHunter {
                    id: hunter.id?,
                    name: hunter.name,
                    level: hunter.level,
                })
            })
            .collect(),
        Err(err) => {
            tracing::warn!("Failed to list existing hunters: {err}");
            Vec::new()
        }
    }
}

#[component]
pub fn HunterSetup(#[prop(into)] on_ready: Callback<HunterId>) -> impl IntoView {
    tracing::info!("Rendering HunterSetup");

    let client = get_client();
    let (name, set_name) = signal(String::new());
    let (title, set_title) = signal(DEFAULT_TITLE.to_string());
    let (existing, set_existing) = signal(Vec::<KnownHunter>::new());

    leptos::task::spawn_local(async move {
        set_existing.set(existing_hunters(&client).await);
    });

    let create_act = Action::new(move |(name, title): &(String, String)| {
        let name = name.clone();
        let title = title.clone();
        async move { SendWrapper::new(create_hunter(&client, &name, &title)).await }
    });
    Effect::new(move |_| {
        if let Some(Ok(hunter_id)) = create_act.value().get() {
            on_ready.run(hunter_id);
        }
    });

    let error = move || {
        if create_act.pending().get() {
            return None;
        }
        let err = create_act.value().get()?.err()?;
        Some(view! { <p class="help is-danger">{err.message}</p> })
    };

    let existing_view = move || {
        let hunters = existing.get();
        if hunters.is_empty() {
            return None;
        }
        let buttons = hunters
            .into_iter()
            .map(|hunter| {
                let label = hunter.label();
                let hunter_id = hunter.id;
                view! {
                    <button class="button is-dark is-small" type="button" on:click=move |_ev| {
                        on_ready.run(hunter_id.clone());
                    }>
                        {label}
                    </button>
                }
            })
            .collect_view();
        Some(view! {
            <div class="block mt-5">
                <h3 class="subtitle is-6">"Or continue as:"</h3>
                <div class="buttons">{buttons}</div>
            </div>
        })
    };

    view! {
        <div class="box">
            <h2 class="title is-4">"Create your Hunter"</h2>
            <form on:submit=move |ev| {
                ev.prevent_default();
                create_act.dispatch((name.get_untracked(), title.get_untracked()));
            }>
                <div class="field">
                    <label class="label">"Name"</label>
                    <div class="control">
                        <input
                            class="input"
                            type="text"
                            placeholder="Sung Jinwoo"
                            prop:value=name
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="field">
                    <label class="label">"Title"</label>
                    <div class="control">
                        <input
                            class="input"
                            type="text"
                            prop:value=title
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                {error}
                <button
                    class="button is-link is-fullwidth mt-3"
                    type="submit"
                    disabled=move || create_act.pending().get()
                >
                    {move || if create_act.pending().get() { "Creating..." } else { "Begin the Awakening" }}
                </button>
            </form>
            {existing_view}
        </div>
    }
}
