use chrono::{DateTime, Utc};
use sqlx::{query, query_as, query_scalar, Executor, Postgres, Transaction};

use crate::core::models::{Choice, ChoiceCount, Question, Vote, VoteInsert};
use crate::core::ports::repository::{PollStore, TxPollStore};
use crate::error::Error;

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> PollStore for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn question(&mut self, id: i32) -> Result<Option<Question>, Error> {
        let question = query_as("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(question)
    }

    async fn latest_questions(&mut self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, Error> {
        let questions = query_as(
            "SELECT *
            FROM questions
            WHERE pub_date <= $1
            ORDER BY pub_date DESC
            LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(questions)
    }

    async fn choices_of(&mut self, question_id: i32) -> Result<Vec<Choice>, Error> {
        let choices = query_as("SELECT * FROM choices WHERE question_id = $1 ORDER BY id")
            .bind(question_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(choices)
    }

    async fn choice_in_question(&mut self, question_id: i32, choice_id: i32) -> Result<Option<Choice>, Error> {
        let choice = query_as("SELECT * FROM choices WHERE id = $1 AND question_id = $2")
            .bind(choice_id)
            .bind(question_id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(choice)
    }

    async fn choice_counts(&mut self, question_id: i32) -> Result<Vec<ChoiceCount>, Error> {
        let counts = query_as(
            "SELECT c.id AS id, c.choice_text AS choice_text, COUNT(v.id) AS votes
            FROM choices AS c
            LEFT JOIN votes AS v ON c.id = v.choice_id
            WHERE c.question_id = $1
            GROUP BY c.id, c.choice_text
            ORDER BY c.id",
        )
        .bind(question_id)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(counts)
    }

    async fn vote_of(&mut self, user_id: i32, question_id: i32) -> Result<Option<Vote>, Error> {
        let vote = query_as("SELECT * FROM votes WHERE user_id = $1 AND question_id = $2")
            .bind(user_id)
            .bind(question_id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(vote)
    }

    async fn insert_vote(&mut self, vote: VoteInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO votes (question_id, choice_id, user_id) VALUES ($1, $2, $3) RETURNING id")
            .bind(vote.question_id)
            .bind(vote.choice_id)
            .bind(vote.user_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn reassign_vote(&mut self, vote_id: i32, choice_id: i32) -> Result<(), Error> {
        query("UPDATE votes SET choice_id = $1 WHERE id = $2")
            .bind(choice_id)
            .bind(vote_id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn vote_count(&mut self, choice_id: i32) -> Result<i64, Error> {
        let count = query_scalar("SELECT COUNT(*) FROM votes WHERE choice_id = $1")
            .bind(choice_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(count)
    }
}

impl TxPollStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }
}
