use actix_web::web::{Data, Json, Path};
use chrono::Utc;
use sqlx::PgPool;

use crate::context::MaybeUser;
use crate::core::services::poll::{latest_questions, question_detail, question_results, QuestionContext, QuestionResults};
use crate::core::models::Question;
use crate::database::sqlx::PgSqlx;
use crate::error::Error;
use crate::response::List;

pub async fn index(db: Data<PgPool>) -> Result<Json<List<Question>>, Error> {
    let conn = db.acquire().await?;
    let mut store = PgSqlx::new(conn);
    let list = latest_questions(&mut store, Utc::now()).await?;
    let total = list.len() as i64;
    Ok(Json(List::new(list, total)))
}

pub async fn detail(user: MaybeUser, path: Path<(i32,)>, db: Data<PgPool>) -> Result<Json<QuestionContext>, Error> {
    let (question_id,) = path.into_inner();
    let conn = db.acquire().await?;
    let mut store = PgSqlx::new(conn);
    let ctx = question_detail(&mut store, user.0.map(|u| u.id), question_id, Utc::now()).await?;
    Ok(Json(ctx))
}

pub async fn results(path: Path<(i32,)>, db: Data<PgPool>) -> Result<Json<QuestionResults>, Error> {
    let (question_id,) = path.into_inner();
    let conn = db.acquire().await?;
    let mut store = PgSqlx::new(conn);
    let page = question_results(&mut store, question_id).await?;
    Ok(Json(page))
}
