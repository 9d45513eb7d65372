//! In-memory `PollStore` used by the service tests.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::models::{Choice, ChoiceCount, Question, QuestionStatus, Vote, VoteInsert};
use crate::core::ports::repository::{PollStore, TxPollStore};
use crate::error::Error;

#[derive(Default)]
struct Inner {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    votes: Vec<Vote>,
    next_id: i32,
}

/// Clones share state, so a test can keep a handle while a service
/// consumes another.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i32 {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        inner.next_id
    }

    pub fn add_question(&self, text: &str, pub_date: DateTime<Utc>, end_date: Option<NaiveDate>) -> i32 {
        let id = self.next_id();
        self.inner.borrow_mut().questions.push(Question {
            id,
            question_text: text.to_owned(),
            pub_date,
            end_date,
            status: QuestionStatus::default(),
        });
        id
    }

    pub fn add_choice(&self, question_id: i32, text: &str) -> i32 {
        let id = self.next_id();
        self.inner.borrow_mut().choices.push(Choice {
            id,
            question_id,
            choice_text: text.to_owned(),
        });
        id
    }

    pub fn votes(&self) -> Vec<Vote> {
        self.inner.borrow().votes.clone()
    }
}

impl PollStore for MemStore {
    async fn question(&mut self, id: i32) -> Result<Option<Question>, Error> {
        Ok(self.inner.borrow().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn latest_questions(&mut self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, Error> {
        let mut published: Vec<Question> = self.inner.borrow().questions.iter().filter(|q| q.pub_date <= now).cloned().collect();
        published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        published.truncate(limit as usize);
        Ok(published)
    }

    async fn choices_of(&mut self, question_id: i32) -> Result<Vec<Choice>, Error> {
        Ok(self.inner.borrow().choices.iter().filter(|c| c.question_id == question_id).cloned().collect())
    }

    async fn choice_in_question(&mut self, question_id: i32, choice_id: i32) -> Result<Option<Choice>, Error> {
        Ok(self
            .inner
            .borrow()
            .choices
            .iter()
            .find(|c| c.id == choice_id && c.question_id == question_id)
            .cloned())
    }

    async fn choice_counts(&mut self, question_id: i32) -> Result<Vec<ChoiceCount>, Error> {
        let inner = self.inner.borrow();
        Ok(inner
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .map(|c| ChoiceCount {
                id: c.id,
                choice_text: c.choice_text.clone(),
                votes: inner.votes.iter().filter(|v| v.choice_id == c.id).count() as i64,
            })
            .collect())
    }

    async fn vote_of(&mut self, user_id: i32, question_id: i32) -> Result<Option<Vote>, Error> {
        Ok(self
            .inner
            .borrow()
            .votes
            .iter()
            .find(|v| v.user_id == user_id && v.question_id == question_id)
            .cloned())
    }

    async fn insert_vote(&mut self, vote: VoteInsert) -> Result<i32, Error> {
        let id = self.next_id();
        self.inner.borrow_mut().votes.push(Vote {
            id,
            question_id: vote.question_id,
            choice_id: vote.choice_id,
            user_id: vote.user_id,
        });
        Ok(id)
    }

    async fn reassign_vote(&mut self, vote_id: i32, choice_id: i32) -> Result<(), Error> {
        let mut inner = self.inner.borrow_mut();
        if let Some(vote) = inner.votes.iter_mut().find(|v| v.id == vote_id) {
            vote.choice_id = choice_id;
        }
        Ok(())
    }

    async fn vote_count(&mut self, choice_id: i32) -> Result<i64, Error> {
        Ok(self.inner.borrow().votes.iter().filter(|v| v.choice_id == choice_id).count() as i64)
    }
}

impl TxPollStore for MemStore {
    async fn commit(self) -> Result<(), Error> {
        Ok(())
    }
}
