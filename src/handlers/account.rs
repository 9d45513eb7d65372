use std::ops::Add;

use actix_web::cookie::time::OffsetDateTime;
use actix_web::cookie::{Cookie, CookieBuilder};
use actix_web::http::StatusCode;
use actix_web::web::{Data, Json};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use hex::ToHex;
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use sqlx::{query_as, query_scalar, PgPool};

use crate::context::MaybeUser;
use crate::core::models::User;
use crate::core::tokener::Tokener;
use crate::error::Error;
use crate::events::{client_ip, AuthEvents};
use crate::impls::tokener::jwt::Jwt;
use crate::middlewares::auth::{Claim, JWT_SECRET, JWT_TOKEN};

fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

fn random_salt() -> String {
    let chars = vec![
        '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
        'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    ];
    let mut slt = String::new();
    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        let i = rng.gen_range(0..chars.len());
        slt.push(chars[i]);
    }
    slt
}

fn issue_token(user: &User) -> Result<String, Error> {
    let claim = Claim {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: chrono::Utc::now().add(chrono::Duration::days(30)).timestamp(),
    };
    let secret = dotenv::var(JWT_SECRET)?;
    let tokener = Jwt::new(secret.as_bytes().to_owned());
    tokener.gen_token(&claim)
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

pub async fn login(req: HttpRequest, Json(Login { username, password }): Json<Login>, db: Data<PgPool>, events: Data<AuthEvents>) -> Result<HttpResponse, Error> {
    let mut conn = db.acquire().await?;
    let user: Option<User> = query_as("SELECT * FROM users WHERE username = $1 OR email = $1")
        .bind(&username)
        .fetch_optional(&mut conn)
        .await?;
    let user = match user {
        Some(user) => user,
        None => {
            events.login_failed(&username);
            return Err(Error::BusinessError("invalid username or password".into()));
        }
    };
    if hash_password(&password, &user.salt) != user.password {
        events.login_failed(&username);
        return Ok(HttpResponse::build(StatusCode::FORBIDDEN).finish());
    }
    let token = issue_token(&user)?;
    events.login(&user.username, &client_ip(&req));
    Ok(HttpResponse::build(StatusCode::OK).cookie(Cookie::new(JWT_TOKEN, token)).finish())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signup {
    username: String,
    email: String,
    password1: String,
    password2: String,
}

pub async fn signup(
    req: HttpRequest,
    Json(Signup {
        username,
        email,
        password1,
        password2,
    }): Json<Signup>,
    db: Data<PgPool>,
    events: Data<AuthEvents>,
) -> Result<HttpResponse, Error> {
    if password1 != password2 {
        return Err(Error::BusinessError("the two password fields didn't match".into()));
    }
    let mut tx = db.begin().await?;
    let taken: bool = query_scalar("SELECT EXISTS(SELECT * FROM users WHERE username = $1)")
        .bind(&username)
        .fetch_one(&mut tx)
        .await?;
    if taken {
        return Err(Error::BusinessError("a user with that username already exists".into()));
    }
    let slt = random_salt();
    let user: User = query_as("INSERT INTO users (username, email, password, salt) VALUES ($1, $2, $3, $4) RETURNING *")
        .bind(&username)
        .bind(&email)
        .bind(hash_password(&password1, &slt))
        .bind(&slt)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    // a fresh account is logged in right away
    let token = issue_token(&user)?;
    events.login(&user.username, &client_ip(&req));
    Ok(HttpResponse::build(StatusCode::CREATED).cookie(Cookie::new(JWT_TOKEN, token)).finish())
}

pub async fn logout(user: MaybeUser, events: Data<AuthEvents>) -> HttpResponse {
    if let MaybeUser(Some(user)) = user {
        events.logout(&user.username);
    }
    HttpResponseBuilder::new(StatusCode::OK)
        .cookie(CookieBuilder::new(JWT_TOKEN, "").expires(OffsetDateTime::now_utc()).finish())
        .finish()
}
