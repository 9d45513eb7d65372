use crate::core::models::{Choice, VoteInsert};
use crate::core::ports::repository::TxPollStore;
use crate::error::Error;

/// What recording a vote did: a fresh vote, or a reassignment of the
/// user's existing vote for the question.
#[derive(Debug)]
pub enum VoteOutcome {
    Created { choice: Choice },
    Updated { previous: Choice, choice: Choice },
}

impl VoteOutcome {
    /// The confirmation message shown to the voter.
    pub fn message(&self) -> String {
        match self {
            VoteOutcome::Created { choice } => format!("You voted for '{}'", choice.choice_text),
            VoteOutcome::Updated { choice, .. } => format!("Your vote was updated to '{}'", choice.choice_text),
        }
    }
}

/// The conditional upsert keyed by (user, question): a user holds at most
/// one vote per question, reassigned in place on a re-vote. Eligibility is
/// NOT re-checked here; the detail view gates it before the form is ever
/// served. Runs in the caller's transaction and commits it.
pub async fn record_vote<S>(mut store: S, user_id: i32, question_id: i32, choice_id: i32) -> Result<VoteOutcome, Error>
where
    S: TxPollStore,
{
    let choice = store.choice_in_question(question_id, choice_id).await?.ok_or(Error::InvalidChoice)?;
    let outcome = match store.vote_of(user_id, question_id).await? {
        Some(vote) => {
            let previous = store
                .choice_in_question(question_id, vote.choice_id)
                .await?
                .ok_or_else(|| Error::BusinessError("vote references a deleted choice".into()))?;
            store.reassign_vote(vote.id, choice.id).await?;
            VoteOutcome::Updated { previous, choice }
        }
        None => {
            store
                .insert_vote(VoteInsert {
                    question_id,
                    choice_id: choice.id,
                    user_id,
                })
                .await?;
            VoteOutcome::Created { choice }
        }
    };
    store.commit().await?;
    Ok(outcome)
}
