use chrono::{DateTime, Utc};

use crate::core::models::{Choice, ChoiceCount, Question, Vote, VoteInsert};
use crate::error::Error;

#[allow(async_fn_in_trait)]
pub trait PollStore {
    async fn question(&mut self, id: i32) -> Result<Option<Question>, Error>;
    /// Questions published at or before `now`, newest first, at most `limit`.
    async fn latest_questions(&mut self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, Error>;
    async fn choices_of(&mut self, question_id: i32) -> Result<Vec<Choice>, Error>;
    async fn choice_in_question(&mut self, question_id: i32, choice_id: i32) -> Result<Option<Choice>, Error>;
    async fn choice_counts(&mut self, question_id: i32) -> Result<Vec<ChoiceCount>, Error>;
    async fn vote_of(&mut self, user_id: i32, question_id: i32) -> Result<Option<Vote>, Error>;
    async fn insert_vote(&mut self, vote: VoteInsert) -> Result<i32, Error>;
    async fn reassign_vote(&mut self, vote_id: i32, choice_id: i32) -> Result<(), Error>;
    async fn vote_count(&mut self, choice_id: i32) -> Result<i64, Error>;
}

#[allow(async_fn_in_trait)]
pub trait TxPollStore: PollStore {
    async fn commit(self) -> Result<(), Error>;
}
