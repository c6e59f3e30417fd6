//! Types for responses from the backend to the frontend.

use crate::HunterId;
use serde::{Deserialize, Deserializer, Serialize};

/// A snapshot of a hunter's profile.
///
/// `id` is only guaranteed on the response to creating a hunter,
/// profile snapshots may leave it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHunter")]
pub struct Profile {
    pub id: Option<HunterId>,
    pub name: String,
    pub title: Option<String>,
    pub level: u32,
    pub exp: u64,
    pub exp_to_next: u64,
    pub streak: u32,
}

impl Profile {
    /// The title to display, defaulting to "Hunter".
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Hunter",
        }
    }

    /// Progress towards the next level in whole percent, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.exp, self.exp_to_next)
    }
}

/// `value` as a rounded percentage of `max`, capped at 100.
/// A `max` of zero is treated as one.
pub fn progress_percent(value: u64, max: u64) -> u8 {
    let max = max.max(1);
    let percent = (value as f64 / max as f64 * 100.0).round();
    percent.min(100.0) as u8
}

/// An entry in the list of existing hunters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHunter")]
pub struct HunterSummary {
    pub id: Option<HunterId>,
    pub name: String,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quest {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub exp_reward: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
    /// The day the quest was issued for, as sent by the backend.
    pub date: Option<String>,
}

// hunters come from the backend with either `id` or `_id`
#[derive(Deserialize)]
struct RawHunter {
    id: Option<HunterId>,
    #[serde(rename = "_id")]
    object_id: Option<HunterId>,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    level: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    exp: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    exp_to_next: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    streak: u32,
}

// `null` is how the backend spells a field it has no value for
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<RawHunter> for Profile {
    fn from(raw: RawHunter) -> Self {
        Self {
            id: HunterId::canonical(raw.id, raw.object_id),
            name: raw.name,
            title: raw.title,
            level: raw.level,
            exp: raw.exp,
            exp_to_next: raw.exp_to_next,
            streak: raw.streak,
        }
    }
}

impl From<RawHunter> for HunterSummary {
    fn from(raw: RawHunter) -> Self {
        Self {
            id: HunterId::canonical(raw.id, raw.object_id),
            name: raw.name,
            level: raw.level,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_takes_id_or_object_id() {
        let with_id: Profile = serde_json::from_value(json!({
            "id": "u1", "name": "Jinwoo", "level": 1, "exp": 0, "exp_to_next": 100
        }))
        .unwrap();
        assert_eq!(with_id.id, Some(HunterId::from("u1")));

        let with_object_id: Profile = serde_json::from_value(json!({
            "_id": "abc123", "name": "Jinwoo"
        }))
        .unwrap();
        assert_eq!(with_object_id.id, Some(HunterId::from("abc123")));

        let both: Profile = serde_json::from_value(json!({
            "id": "", "_id": 7, "name": "Jinwoo"
        }))
        .unwrap();
        assert_eq!(both.id, Some(HunterId::from("7")));
    }

    #[test]
    fn profile_defaults_missing_numbers() {
        let profile: Profile = serde_json::from_value(json!({ "name": "Jinwoo" })).unwrap();
        assert_eq!(profile.id, None);
        assert_eq!(profile.level, 0);
        assert_eq!(profile.exp_to_next, 0);
        assert_eq!(profile.display_title(), "Hunter");
    }

    #[test]
    fn display_title_ignores_blank_titles() {
        let mut profile: Profile = serde_json::from_value(json!({
            "name": "Jinwoo", "title": "Shadow Monarch"
        }))
        .unwrap();
        assert_eq!(profile.display_title(), "Shadow Monarch");
        profile.title = Some("  ".to_string());
        assert_eq!(profile.display_title(), "Hunter");
    }

    #[test]
    fn progress_is_rounded_and_capped() {
        assert_eq!(progress_percent(0, 100), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(250, 100), 100);
        assert_eq!(progress_percent(1, 0), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn summaries_normalize_ids() {
        let summaries: Vec<HunterSummary> = serde_json::from_value(json!([
            { "id": "u1", "name": "Jinwoo", "level": 3 },
            { "_id": "u2", "name": "Cha Hae-In", "level": 9 },
            { "name": "Nameless", "level": 1 },
        ]))
        .unwrap();
        let ids = summaries.iter().map(|s| s.id.clone()).collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![Some(HunterId::from("u1")), Some(HunterId::from("u2")), None]
        );
    }

    #[test]
    fn quest_fills_in_defaults() {
        let quest: Quest = serde_json::from_value(json!({
            "title": "Push-ups", "exp_reward": 50
        }))
        .unwrap();
        assert!(!quest.completed);
        assert_eq!(quest.description, "");
        assert_eq!(quest.date, None);
    }

    #[test]
    fn nulls_fall_back_to_defaults() {
        let quest: Quest = serde_json::from_value(json!({
            "title": null, "description": null, "exp_reward": 50, "completed": null
        }))
        .unwrap();
        assert_eq!(quest.title, "");
        assert_eq!(quest.exp_reward, 50);
        assert!(!quest.completed);

        let profile: Profile = serde_json::from_value(json!({
            "id": "u1", "name": null, "level": 2, "exp": null, "exp_to_next": 100
        }))
        .unwrap();
        assert_eq!(profile.id, Some(HunterId::from("u1")));
        assert_eq!(profile.name, "");
        assert_eq!((profile.level, profile.exp), (2, 0));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let fractional = serde_json::from_value::<Quest>(json!({ "exp_reward": 50.5 }));
        assert!(fractional.is_err());
        let text_level = serde_json::from_value::<Profile>(json!({ "name": "Jinwoo", "level": "one" }));
        assert!(text_level.is_err());
    }
}
