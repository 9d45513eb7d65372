use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Choice {
    pub id: i32,
    pub question_id: i32,
    pub choice_text: String,
}

/// One row of a results page: a choice and how many votes it holds.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChoiceCount {
    pub id: i32,
    pub choice_text: String,
    pub votes: i64,
}
