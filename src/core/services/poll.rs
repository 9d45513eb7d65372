use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::models::{Choice, ChoiceCount, Question};
use crate::core::ports::repository::PollStore;
use crate::error::Error;

/// The index never shows more than the five most recent polls.
pub const LATEST_LIMIT: i64 = 5;

/// The rendering context of a poll's voting page.
#[derive(Debug, Serialize)]
pub struct QuestionContext {
    pub question: Question,
    pub choices: Vec<Choice>,
    /// The requester's current choice id for this question, when logged in
    /// and already voted.
    pub user_vote: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResults {
    pub question: Question,
    pub results: Vec<ChoiceCount>,
}

/// The last published questions, newest first. Questions with a `pub_date`
/// in the future are excluded.
pub async fn latest_questions<D>(db: &mut D, now: DateTime<Utc>) -> Result<Vec<Question>, Error>
where
    D: PollStore,
{
    db.latest_questions(now, LATEST_LIMIT).await
}

/// Resolves a question for its voting page. Unknown ids and polls outside
/// their voting window surface as redirect-carrying errors, never a bare
/// 404.
pub async fn question_detail<D>(db: &mut D, user_id: Option<i32>, question_id: i32, now: DateTime<Utc>) -> Result<QuestionContext, Error>
where
    D: PollStore,
{
    let question = db
        .question(question_id)
        .await?
        .ok_or_else(|| Error::NotFound("The requested poll does not exist.".into()))?;
    if !question.can_vote(now) {
        return Err(Error::NotVotable("Voting is not allowed for this poll.".into()));
    }
    let choices = db.choices_of(question_id).await?;
    let user_vote = match user_id {
        Some(uid) => db.vote_of(uid, question_id).await?.map(|v| v.choice_id),
        None => None,
    };
    Ok(QuestionContext { question, choices, user_vote })
}

/// Per-choice vote counts, recomputed from storage on every call.
pub async fn question_results<D>(db: &mut D, question_id: i32) -> Result<QuestionResults, Error>
where
    D: PollStore,
{
    let question = db
        .question(question_id)
        .await?
        .ok_or_else(|| Error::NotFound("The requested poll does not exist.".into()))?;
    let results = db.choice_counts(question_id).await?;
    Ok(QuestionResults { question, results })
}
