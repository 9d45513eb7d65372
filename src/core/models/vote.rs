use serde::Serialize;
use sqlx::FromRow;

/// A user's current selection for one question. The vote references the
/// question directly (not only the choice) so storage can enforce
/// `UNIQUE (user_id, question_id)`, keeping concurrent double-submission
/// from creating two rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vote {
    pub id: i32,
    pub question_id: i32,
    pub choice_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone)]
pub struct VoteInsert {
    pub question_id: i32,
    pub choice_id: i32,
    pub user_id: i32,
}
