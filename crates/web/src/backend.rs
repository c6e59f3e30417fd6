//! The operations the hunter backend offers.
//!
//! Page logic is written against [`Backend`] so it can run against the
//! browser client or an in-memory stand-in.

use crate::error::WebResult;
use hunter_api::{request as req, response as res, HunterId};

/// One method per backend endpoint.
///
/// Successful responses whose body is empty or can't be understood resolve to `None`.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn create_hunter(&self, hunter: &req::NewHunter<'_>) -> WebResult<Option<res::Profile>>;

    async fn list_hunters(&self) -> WebResult<Option<Vec<res::HunterSummary>>>;

    async fn get_profile(&self, hunter_id: &HunterId) -> WebResult<Option<res::Profile>>;

    async fn check_in(&self, hunter_id: &HunterId) -> WebResult<()>;

    async fn get_quest(&self, hunter_id: &HunterId) -> WebResult<Option<res::Quest>>;

    async fn complete_quest(&self, completion: &req::CompleteQuest<'_>) -> WebResult<()>;

    async fn log_workout(&self, workout: &req::NewWorkout<'_>) -> WebResult<()>;
}
