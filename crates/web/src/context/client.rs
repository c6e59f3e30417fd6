//! Client context for communicating with the backend.

use crate::{
    backend::Backend,
    error::{WebError, WebResult},
};
use hunter_api::{request as req, response as res, HunterId};
use reqwasm::http::Request;
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Serialize,
};

#[derive(Clone, Copy)]
pub(super) struct ClientBuilder {
    backend_addr: &'static str,
}

impl ClientBuilder {
    pub(super) fn new(backend_addr: &'static str) -> Self {
        Self { backend_addr }
    }

    pub(super) fn build(self) -> Client {
        Client {
            backend_addr: self.backend_addr,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Client {
    backend_addr: &'static str,
}

/// Non-API methods
impl Client {
    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> WebResult<Option<T>> {
        let res = request
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(WebError::transport)?;
        let bytes = res.binary().await.unwrap_or_default();
        read_body(res.status(), &res.status_text(), &bytes)
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> WebResult<Option<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let json = serde_json::to_string(body).map_err(WebError::transport)?;
        self.fetch(Request::post(url).body(json)).await
    }
}

/// API methods
impl Backend for Client {
    async fn create_hunter(&self, hunter: &req::NewHunter<'_>) -> WebResult<Option<res::Profile>> {
        tracing::info!("Creating hunter {}", hunter.name);

        let url = endpoint(self.backend_addr, "/api/hunters", None);
        let profile: Option<res::Profile> = self.post_json(&url, hunter).await?;

        tracing::info!("Created hunter {}: {profile:?}", hunter.name);
        Ok(profile)
    }

    async fn list_hunters(&self) -> WebResult<Option<Vec<res::HunterSummary>>> {
        tracing::info!("Fetching hunters");

        let url = endpoint(self.backend_addr, "/api/hunters", None);
        let hunters = self.fetch(Request::get(&url)).await?;

        tracing::info!("Fetched hunters: {hunters:?}");
        Ok(hunters)
    }

    async fn get_profile(&self, hunter_id: &HunterId) -> WebResult<Option<res::Profile>> {
        tracing::info!("Fetching profile {hunter_id}");

        let url = endpoint(self.backend_addr, "/api/profile", Some(hunter_id));
        let profile = self.fetch(Request::get(&url)).await?;

        tracing::info!("Fetched profile {hunter_id}: {profile:?}");
        Ok(profile)
    }

    async fn check_in(&self, hunter_id: &HunterId) -> WebResult<()> {
        tracing::info!("Checking in {hunter_id}");

        let url = endpoint(self.backend_addr, "/api/checkin", Some(hunter_id));
        self.fetch::<serde_json::Value>(Request::post(&url)).await?;

        tracing::info!("Checked in {hunter_id}");
        Ok(())
    }

    async fn get_quest(&self, hunter_id: &HunterId) -> WebResult<Option<res::Quest>> {
        tracing::info!("Fetching quest for {hunter_id}");

        let url = endpoint(self.backend_addr, "/api/quests", Some(hunter_id));
        let quest = self.fetch(Request::get(&url)).await?;

        tracing::info!("Fetched quest for {hunter_id}: {quest:?}");
        Ok(quest)
    }

    async fn complete_quest(&self, completion: &req::CompleteQuest<'_>) -> WebResult<()> {
        tracing::info!(
            "Completing quest of {} for {}",
            completion.user_id,
            completion.date
        );

        let url = endpoint(self.backend_addr, "/api/quests/complete", None);
        self.post_json::<_, serde_json::Value>(&url, completion)
            .await?;

        tracing::info!("Completed quest of {}", completion.user_id);
        Ok(())
    }

    async fn log_workout(&self, workout: &req::NewWorkout<'_>) -> WebResult<()> {
        tracing::info!(
            "Logging {} minutes of {} for {}",
            workout.minutes,
            workout.workout_type,
            workout.user_id
        );

        let url = endpoint(self.backend_addr, "/api/workouts", None);
        self.post_json::<_, serde_json::Value>(&url, workout)
            .await?;

        tracing::info!("Logged workout for {}", workout.user_id);
        Ok(())
    }
}

/// Joins the backend address and path, adding the hunter as the `user_id` query parameter.
fn endpoint(backend_addr: &str, path: &str, hunter_id: Option<&HunterId>) -> String {
    match hunter_id {
        Some(id) => format!(
            "{backend_addr}{path}?user_id={}",
            urlencoding::encode(id.as_str())
        ),
        None => format!("{backend_addr}{path}"),
    }
}

/// Turns a finished response into its data.
///
/// Non-success statuses are errors. Success bodies that are empty or not JSON are `None`,
/// JSON that doesn't fit `T` is an error.
fn read_body<T: DeserializeOwned>(status: u16, status_text: &str, body: &[u8]) -> WebResult<Option<T>> {
    if !(200..=299).contains(&status) {
        let detail = error_detail(body);
        tracing::warn!("Backend returned {status} {status_text}: {detail}");
        return Err(WebError::status(
            status,
            format!("{status} {status_text} - {detail}"),
        ));
    }
    if let Err(err) = serde_json::from_slice::<IgnoredAny>(body) {
        if !body.is_empty() {
            tracing::debug!("Ignoring non-JSON response body: {err}");
        }
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(|err| {
        tracing::warn!("Backend returned {status} with an unexpected body: {err}");
        WebError::decode(format!("Unexpected response from the backend: {err}"))
    })
}

/// The most useful part of an error body: its `detail`, the whole JSON or the raw text.
fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => match json.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(detail) if is_truthy(detail) => detail.to_string(),
            _ => json.to_string(),
        },
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn failure_message_carries_status_and_detail() {
        let err = read_body::<res::Profile>(404, "Not Found", br#"{"detail":"Hunter not found"}"#)
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Status(404));
        assert_eq!(err.message, "404 Not Found - Hunter not found");
    }

    #[test]
    fn failure_without_detail_uses_whole_body() {
        let err = read_body::<res::Quest>(500, "Internal Server Error", br#"{"error":"boom"}"#)
            .unwrap_err();
        assert_eq!(err.message, r#"500 Internal Server Error - {"error":"boom"}"#);

        let err = read_body::<res::Quest>(502, "Bad Gateway", b"upstream timed out").unwrap_err();
        assert_eq!(err.message, "502 Bad Gateway - upstream timed out");
    }

    #[test]
    fn structured_detail_is_serialized() {
        let body = br#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#;
        let err = read_body::<res::Profile>(422, "Unprocessable Entity", body).unwrap_err();
        assert!(err.message.starts_with("422 Unprocessable Entity - [{"));
        assert!(err.message.contains("field required"));
    }

    #[test]
    fn every_failure_status_mentions_the_code() {
        for status in [301, 400, 401, 403, 409, 418, 500, 503] {
            let err = read_body::<serde_json::Value>(status, "", b"").unwrap_err();
            assert!(err.message.contains(&status.to_string()));
        }
    }

    #[test]
    fn unreadable_success_body_is_empty_result() {
        let empty = read_body::<res::Profile>(200, "OK", b"").unwrap();
        assert_eq!(empty, None);
        let garbage = read_body::<res::Profile>(200, "OK", b"<html>").unwrap();
        assert_eq!(garbage, None);
        let no_content = read_body::<serde_json::Value>(204, "No Content", b"").unwrap();
        assert_eq!(no_content, None);
    }

    #[test]
    fn nulls_in_success_body_are_kept_as_defaults() {
        let body = br#"{"title":null,"description":"Before noon","exp_reward":50,"completed":false}"#;
        let quest = read_body::<res::Quest>(200, "OK", body).unwrap().unwrap();
        assert_eq!(quest.title, "");
        assert_eq!(quest.exp_reward, 50);

        let body = br#"{"id":"u1","name":null,"level":1,"exp":0,"exp_to_next":100}"#;
        let profile = read_body::<res::Profile>(200, "OK", body).unwrap().unwrap();
        assert_eq!(profile.id, Some(HunterId::from("u1")));
        assert_eq!(profile.exp_to_next, 100);
    }

    #[test]
    fn mismatched_success_body_is_an_error() {
        let body = br#"{"title":"Push-ups","exp_reward":50.5}"#;
        let err = read_body::<res::Quest>(200, "OK", body).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Decode);
        assert!(err.message.starts_with("Unexpected response from the backend: "));
        assert!(err.message.contains("50.5"));

        let body = br#""Jinwoo""#;
        let err = read_body::<res::Profile>(200, "OK", body).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Decode);
    }

    #[test]
    fn success_body_is_parsed() {
        let body = br#"{"id":"u1","name":"Jinwoo","level":1,"exp":0,"exp_to_next":100}"#;
        let profile = read_body::<res::Profile>(201, "Created", body)
            .unwrap()
            .unwrap();
        assert_eq!(profile.id, Some(HunterId::from("u1")));
        assert_eq!(profile.exp_to_next, 100);
    }

    #[test]
    fn endpoints_encode_the_hunter() {
        let id = HunterId::from("a b&c");
        assert_eq!(
            endpoint("http://localhost:8000", "/api/profile", Some(&id)),
            "http://localhost:8000/api/profile?user_id=a%20b%26c"
        );
        assert_eq!(
            endpoint("http://localhost:8000", "/api/hunters", None),
            "http://localhost:8000/api/hunters"
        );
    }
}
