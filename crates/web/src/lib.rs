#![allow(clippy::unit_arg)]

pub mod backend;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod pages;

use context::{get_session, session::Screen};
use hunter_api::HunterId;
use leptos::prelude::*;
use leptos_meta::*;
use pages::*;

/// Wraps the content in a basic layout and a final fallback error boundary which should never actually trigger
#[component]
pub fn App() -> impl IntoView {
    tracing::info!("Rendering app");

    let fallback = move |errors: ArcRwSignal<Errors>| {
        errors
            .get_untracked()
            .into_iter()
            .map(|(_key, err)| {
                view! { <div>{format!("Unhandled error: {err}")}</div>}
            })
            .collect_view()
    };

    view! {
            <Meta name="description" content="Gamified daily training, level up your hunter"/>
            <Title text="Solo Leveling Fitness"/>
            <div class="is-flex is-flex-direction-column" style="min-height: 100vh">
                <div class="section is-flex-grow-1">
                    <div class="container is-max-tablet">
                        <header class="block has-text-centered">
                            <h1 class="title is-2">"Solo Leveling Fitness"</h1>
                            <p class="subtitle is-6">"Gamified daily training • Level up your hunter"</p>
                        </header>
                        <main>
                            <ErrorBoundary fallback>
                                <Content/>
                            </ErrorBoundary>
                        </main>
                    </div>
                </div>
                <footer class="footer">
                    <div class="content has-text-centered is-size-7">
                        "Backend connected via API • Your progress is kept by the server"
                    </div>
                </footer>
            </div>
    }
}

/// Shows the setup until a hunter is selected, then the dashboard
#[component]
pub fn Content() -> impl IntoView {
    let session = get_session();
    let screen = Memo::new(move |_| session.screen());

    let on_ready = Callback::new(move |hunter_id: HunterId| session.select(hunter_id));
    let on_reset = Callback::new(move |()| session.reset());

    move || match screen.get() {
        Screen::Setup => view! { <HunterSetup on_ready/> }.into_any(),
        Screen::Dashboard(hunter_id) => view! { <Dashboard hunter_id on_reset/> }.into_any(),
    }
}

#[cfg(test)]
mod test {
    use crate::{
        backend::mock::MockBackend,
        context::session::{MemoryStore, Screen, Selection},
        pages::{dashboard, setup},
    };
    use futures::executor::block_on;
    use hunter_api::{response::Profile, HunterId};
    use std::sync::Arc;

    #[test]
    fn new_hunter_reaches_dashboard() {
        let backend = MockBackend::default();
        *backend.created.borrow_mut() = Ok(Some(Profile {
            id: Some(HunterId::from("u1")),
            name: "Jinwoo".to_string(),
            title: Some("Shadow Monarch".to_string()),
            level: 1,
            exp: 0,
            exp_to_next: 100,
            streak: 0,
        }));
        let store = Arc::new(MemoryStore::default());
        let mut selection = Selection::restore(store.clone());
        assert_eq!(Screen::for_selection(selection.current().cloned()), Screen::Setup);

        let hunter_id =
            block_on(setup::create_hunter(&backend, "Jinwoo", "Shadow Monarch")).unwrap();
        selection.select(hunter_id.clone());
        assert_eq!(
            Screen::for_selection(selection.current().cloned()),
            Screen::Dashboard(HunterId::from("u1"))
        );

        *backend.profile.borrow_mut() = backend.created.borrow().clone();
        let data = block_on(dashboard::load(&backend, &hunter_id)).unwrap();
        assert_eq!(data.profile.level, 1);
        assert_eq!(
            (data.profile.exp, data.profile.exp_to_next),
            (0, 100)
        );
        assert_eq!(data.profile.progress_percent(), 0);

        let reopened = Selection::restore(store);
        assert_eq!(reopened.current(), Some(&HunterId::from("u1")));
    }

    #[test]
    fn switching_profile_returns_to_setup_without_calls() {
        let backend = MockBackend::default();
        let mut selection = Selection::restore(Arc::new(MemoryStore::with("u1")));

        selection.reset();

        assert_eq!(Screen::for_selection(selection.current().cloned()), Screen::Setup);
        assert!(backend.calls().is_empty());
    }
}
