use actix_web::web::{Data, Form, Path};
use actix_web::HttpResponse;
use log::info;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::context::UserInfo;
use crate::core::models::{Choice, Question};
use crate::core::ports::repository::PollStore;
use crate::core::services::vote::record_vote;
use crate::database::sqlx::PgSqlx;
use crate::error::Error;
use crate::response::redirect_with;

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    choice: Option<String>,
}

/// The submitted choice id, when the field was present and numeric. The
/// field arrives as raw form text so that garbage like `choice=abc` takes
/// the same re-render path as a missing field.
fn submitted_choice(form: &VoteForm) -> Option<i32> {
    form.choice.as_deref().and_then(|c| c.parse().ok())
}

/// The detail page context served back when a submission carried no usable
/// choice. Rendering is the front end's job; this is the same context the
/// detail view serves, plus the inline error.
#[derive(Debug, Serialize)]
struct VoteFormContext {
    question: Question,
    choices: Vec<Choice>,
    error_message: &'static str,
}

pub async fn vote(user: UserInfo, path: Path<(i32,)>, form: Form<VoteForm>, db: Data<PgPool>) -> Result<HttpResponse, Error> {
    let (question_id,) = path.into_inner();
    let choice_id = match submitted_choice(&form) {
        Some(choice_id) => choice_id,
        None => {
            let mut store = PgSqlx::new(db.acquire().await?);
            return redisplay_form(&mut store, question_id).await;
        }
    };
    let store = PgSqlx::new(db.begin().await?);
    match record_vote(store, user.id, question_id, choice_id).await {
        Ok(outcome) => {
            info!("user {} voted on question {}", user.username, question_id);
            let message = outcome.message();
            Ok(redirect_with(&format!("/polls/{}/results", question_id), &[("message", message.as_str())]))
        }
        Err(Error::InvalidChoice) => {
            let mut store = PgSqlx::new(db.acquire().await?);
            redisplay_form(&mut store, question_id).await
        }
        Err(e) => Err(e),
    }
}

async fn redisplay_form<D>(store: &mut D, question_id: i32) -> Result<HttpResponse, Error>
where
    D: PollStore,
{
    let question = store
        .question(question_id)
        .await?
        .ok_or_else(|| Error::NotFound("The requested poll does not exist.".into()))?;
    let choices = store.choices_of(question_id).await?;
    Ok(HttpResponse::Ok().json(VoteFormContext {
        question,
        choices,
        error_message: "You didn't select a choice.",
    }))
}
