//! The hunter's progress, today's quest and workout logging.

use crate::{
    backend::Backend,
    components::{Notice, NoticeView, ProgressBar},
    context::{client::Client, get_client},
    error::{WebError, WebResult},
};
use chrono::NaiveDate;
use hunter_api::{
    request::{self as req, Difficulty},
    response as res, HunterId,
};
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use std::{
    future::Future,
    num::IntErrorKind,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    pub profile: res::Profile,
    pub quest: Option<res::Quest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready(DashboardData),
    Failed(WebError),
}

impl From<WebResult<DashboardData>> for LoadState {
    fn from(value: WebResult<DashboardData>) -> Self {
        match value {
            Ok(data) => LoadState::Ready(data),
            Err(err) => LoadState::Failed(err),
        }
    }
}

/// Hands out a ticket per load, only the newest ticket's result may be applied.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTracker {
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Makes every ticket handed out so far stale.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fetches the profile and the quest at the same time, both have to succeed.
pub async fn load<B: Backend>(backend: &B, hunter_id: &HunterId) -> WebResult<DashboardData> {
    let (profile, quest) = futures_util::join!(
        backend.get_profile(hunter_id),
        backend.get_quest(hunter_id)
    );
    let profile = profile?
        .ok_or_else(|| WebError::missing(format!("No profile found for hunter {hunter_id}")))?;
    let quest = quest?;
    Ok(DashboardData { profile, quest })
}

/// Runs an action and, if it went through, loads the dashboard again.
pub async fn run_then_reload<B, F>(
    backend: &B,
    hunter_id: &HunterId,
    action: F,
) -> (WebResult<()>, Option<WebResult<DashboardData>>)
where
    B: Backend,
    F: Future<Output = WebResult<()>>,
{
    let outcome = action.await;
    let reloaded = if outcome.is_ok() {
        Some(load(backend, hunter_id).await)
    } else {
        None
    };
    (outcome, reloaded)
}

pub async fn check_in<B: Backend>(backend: &B, hunter_id: &HunterId) -> WebResult<()> {
    backend.check_in(hunter_id).await
}

pub fn can_complete(quest: &res::Quest) -> bool {
    !quest.completed
}

pub async fn complete_quest<B: Backend>(
    backend: &B,
    hunter_id: &HunterId,
    quest: &res::Quest,
    today: NaiveDate,
) -> WebResult<()> {
    if !can_complete(quest) {
        return Err(WebError::validation("Quest already completed"));
    }
    let completion = req::CompleteQuest::new(hunter_id.as_str(), quest.date.as_deref(), today);
    backend.complete_quest(&completion).await
}

/// The workout form's fields as typed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutDraft {
    pub workout_type: String,
    pub minutes: String,
    pub difficulty: Difficulty,
}

impl WorkoutDraft {
    pub fn validate<'a>(&'a self, hunter_id: &'a HunterId) -> WebResult<req::NewWorkout<'a>> {
        let workout_type = self.workout_type.trim();
        match parse_minutes(&self.minutes) {
            Some(minutes) if !workout_type.is_empty() => Ok(req::NewWorkout {
                user_id: hunter_id.as_str().into(),
                workout_type: workout_type.into(),
                minutes,
                difficulty: self.difficulty,
            }),
            _ => Err(WebError::validation("Enter workout and minutes")),
        }
    }
}

// leading digits only, "45 min" counts as 45, too many minutes saturate
fn parse_minutes(input: &str) -> Option<u32> {
    let digits = input
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    let minutes = match digits.parse::<u32>() {
        Ok(minutes) => minutes,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => return None,
    };
    (minutes > 0).then_some(minutes)
}

pub async fn log_workout<B: Backend>(
    backend: &B,
    hunter_id: &HunterId,
    draft: &WorkoutDraft,
) -> WebResult<()> {
    let workout = draft.validate(hunter_id)?;
    backend.log_workout(&workout).await
}

/// Everything a load cycle needs, cheap to clone into futures.
#[derive(Clone)]
struct Loader {
    client: Client,
    hunter_id: HunterId,
    state: RwSignal<LoadState>,
    tracker: LoadTracker,
}

impl Loader {
    fn start(&self) {
        let ticket = self.tracker.begin();
        self.state.set(LoadState::Loading);

        let loader = self.clone();
        leptos::task::spawn_local(async move {
            let loaded = load(&loader.client, &loader.hunter_id).await;
            loader.finish(ticket, loaded);
        });
    }

    /// Runs an action, reloading after it if it went through.
    async fn run(&self, action: impl Future<Output = WebResult<()>>) -> WebResult<()> {
        let ticket = self.tracker.begin();
        let (outcome, reloaded) = run_then_reload(&self.client, &self.hunter_id, action).await;
        if let Some(loaded) = reloaded {
            self.finish(ticket, loaded);
        }
        outcome
    }

    fn finish(&self, ticket: LoadTicket, loaded: WebResult<DashboardData>) {
        if self.tracker.is_current(ticket) {
            self.state.set(loaded.into());
        } else {
            tracing::debug!("Discarding stale dashboard load for {}", self.hunter_id);
        }
    }
}

#[component]
pub fn Dashboard(hunter_id: HunterId, #[prop(into)] on_reset: Callback<()>) -> impl IntoView {
    tracing::info!("Rendering Dashboard for {hunter_id}");

    let client = get_client();
    let state = RwSignal::new(LoadState::Loading);
    let notice = RwSignal::new(None::<Notice>);
    let loader = Loader {
        client,
        hunter_id,
        state,
        tracker: LoadTracker::default(),
    };
    on_cleanup({
        let tracker = loader.tracker.clone();
        move || tracker.invalidate()
    });
    loader.start();
    let reload = Callback::new({
        let loader = loader.clone();
        move |()| loader.start()
    });

    // workout form
    let (workout_type, set_workout_type) = signal(String::new());
    let (minutes, set_minutes) = signal(String::new());
    let (difficulty, set_difficulty) = signal(Difficulty::default());

    // actions
    let check_in_act = Action::new({
        let loader = loader.clone();
        move |&()| {
            let loader = loader.clone();
            async move {
                let outcome =
                    SendWrapper::new(loader.run(check_in(&loader.client, &loader.hunter_id))).await;
                notice.set(Some(Notice::from_outcome(&outcome, "Checked in for today")));
                outcome
            }
        }
    });
    let complete_act = Action::new({
        let loader = loader.clone();
        move |quest: &res::Quest| {
            let loader = loader.clone();
            let quest = quest.clone();
            let today = chrono::Local::now().date_naive();
            async move {
                let outcome = SendWrapper::new(loader.run(complete_quest(
                    &loader.client,
                    &loader.hunter_id,
                    &quest,
                    today,
                )))
                .await;
                notice.set(Some(Notice::from_outcome(&outcome, "Quest completed")));
                outcome
            }
        }
    });
    let log_act = Action::new({
        let loader = loader.clone();
        move |draft: &WorkoutDraft| {
            let loader = loader.clone();
            let draft = draft.clone();
            async move {
                let outcome = SendWrapper::new(
                    loader.run(log_workout(&loader.client, &loader.hunter_id, &draft)),
                )
                .await;
                notice.set(Some(Notice::from_outcome(&outcome, "Workout logged")));
                if outcome.is_ok() {
                    set_workout_type.set(String::new());
                    set_minutes.set(String::new());
                    set_difficulty.set(Difficulty::default());
                }
                outcome
            }
        }
    });

    // views
    let quest_view = move |quest: res::Quest| {
        let status = if quest.completed {
            view! { <span class="has-text-success">"Completed"</span> }.into_any()
        } else {
            view! { <span class="has-text-warning">{format!("+{} EXP", quest.exp_reward)}</span> }
                .into_any()
        };
        let complete_button = can_complete(&quest).then(|| {
            let quest = quest.clone();
            view! {
                <button
                    class="button is-warning is-fullwidth"
                    disabled=move || complete_act.pending().get()
                    on:click=move |_ev| { complete_act.dispatch(quest.clone()); }
                >
                    "Complete Quest"
                </button>
            }
        });
        view! {
            <div class="box">
                <div class="level is-mobile mb-2">
                    <div class="level-left">
                        <h3 class="title is-5">"Daily Quest"</h3>
                    </div>
                    <div class="level-right">{status}</div>
                </div>
                <p>{quest.title}</p>
                <p class="is-size-7 has-text-grey mb-4">{quest.description}</p>
                {complete_button}
            </div>
        }
    };

    let workout_view = move || {
        let options = Difficulty::ALL
            .into_iter()
            .map(|d| {
                view! {
                    <option value=d.as_str() selected=move || difficulty.get() == d>
                        {d.label()}
                    </option>
                }
            })
            .collect_view();
        view! {
            <div class="box">
                <h3 class="title is-5">"Log Workout"</h3>
                <form on:submit=move |ev| {
                    ev.prevent_default();
                    log_act.dispatch(WorkoutDraft {
                        workout_type: workout_type.get_untracked(),
                        minutes: minutes.get_untracked(),
                        difficulty: difficulty.get_untracked(),
                    });
                }>
                    <div class="field is-grouped">
                        <div class="control is-expanded">
                            <input
                                class="input"
                                type="text"
                                placeholder="Workout (e.g., Run)"
                                prop:value=workout_type
                                on:input=move |ev| set_workout_type.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="control">
                            <input
                                class="input"
                                type="number"
                                min="1"
                                placeholder="Minutes"
                                prop:value=minutes
                                on:input=move |ev| set_minutes.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="control">
                            <div class="select">
                                <select on:change=move |ev| {
                                        let picked = event_target_value(&ev).parse().unwrap_or_default();
                                        set_difficulty.set(picked);
                                    }
                                >
                                    {options}
                                </select>
                            </div>
                        </div>
                        <div class="control">
                            <button
                                class="button is-link"
                                type="submit"
                                disabled=move || log_act.pending().get()
                            >
                                "Add"
                            </button>
                        </div>
                    </div>
                </form>
            </div>
        }
    };

    let ready_view = move |data: DashboardData| {
        let DashboardData { profile, quest } = data;
        let subtitle = format!("{} • Streak {}", profile.display_title(), profile.streak);
        view! {
            <div class="level is-mobile">
                <div class="level-left">
                    <div>
                        <h2 class="title is-4">{profile.name.clone()}</h2>
                        <p class="subtitle is-6">{subtitle}</p>
                    </div>
                </div>
                <div class="level-right">
                    <button class="button is-small" on:click=move |_ev| on_reset.run(())>
                        "Switch"
                    </button>
                </div>
            </div>
            <div class="box">
                <div class="level is-mobile">
                    <div class="level-left">"Level"</div>
                    <div class="level-right">
                        <p class="title is-3">{profile.level}</p>
                    </div>
                </div>
                <ProgressBar value=profile.exp max=profile.exp_to_next/>
                <div class="level is-mobile is-size-7">
                    <span>{format!("{} EXP", profile.exp)}</span>
                    <span>{format!("{} to next", profile.exp_to_next)}</span>
                </div>
                <button
                    class="button is-primary is-fullwidth mt-4"
                    disabled=move || check_in_act.pending().get()
                    on:click=move |_ev| { check_in_act.dispatch(()); }
                >
                    "Daily Check-in"
                </button>
            </div>
            {quest.map(quest_view)}
            {workout_view}
        }
        .into_any()
    };

    let body = move || match state.get() {
        LoadState::Loading => view! { <div>"Loading..."</div> }.into_any(),
        LoadState::Failed(err) => view! {
            <div class="notification is-danger">
                {err.message}
                <button class="button is-small ml-3" on:click=move |_ev| reload.run(())>
                    "Retry"
                </button>
            </div>
        }
        .into_any(),
        LoadState::Ready(data) => ready_view(data),
    };

    view! {
        <div class="block">
            <NoticeView notice/>
            {body}
        </div>
    }
}
