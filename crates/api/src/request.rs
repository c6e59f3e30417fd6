//! Types for requests from the frontend to the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewHunter<'a> {
    pub name: Cow<'a, str>,
    pub title: Cow<'a, str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompleteQuest<'a> {
    pub user_id: Cow<'a, str>,
    pub date: Cow<'a, str>,
}

impl<'a> CompleteQuest<'a> {
    /// Completes the quest issued for `quest_date`,
    /// falling back to `today` when the backend didn't tell which day the quest is for.
    pub fn new(user_id: &'a str, quest_date: Option<&'a str>, today: NaiveDate) -> Self {
        let date = match quest_date.filter(|d| !d.trim().is_empty()) {
            Some(date) => Cow::Borrowed(date),
            None => Cow::Owned(today.format("%Y-%m-%d").to_string()),
        };
        Self {
            user_id: user_id.into(),
            date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewWorkout<'a> {
    pub user_id: Cow<'a, str>,
    pub workout_type: Cow<'a, str>,
    pub minutes: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}`")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}
