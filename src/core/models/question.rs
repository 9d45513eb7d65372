use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored as plain text in the `status` column, `active` by default.
#[derive(sqlx::Type)]
#[sqlx(type_name = "VARCHAR")]
#[sqlx(rename_all = "lowercase")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    #[default]
    Active,
    Closed,
}

/// A poll: some text, a publish time and an optional last day of voting.
/// The eligibility checks are pure functions of a caller-supplied `now` so
/// that callers (and tests) control the evaluation instant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub end_date: Option<NaiveDate>,
    pub status: QuestionStatus,
}

impl Question {
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        now >= self.pub_date
    }

    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    /// Whether the poll accepts votes at `now`. `end_date` means the whole
    /// of that day: the date portion of `now` is compared, both bounds
    /// inclusive. Without an end date the poll stays open indefinitely.
    pub fn can_vote(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            None => self.pub_date <= now,
            Some(end_date) => self.pub_date <= now && now.date_naive() <= end_date,
        }
    }
}
