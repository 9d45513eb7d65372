extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate hex;
extern crate jsonwebtoken;
extern crate log;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate serde_urlencoded;
extern crate sha2;
extern crate sqlx;
extern crate thiserror;
extern crate tokio;

mod context;
mod core;
mod database;
mod error;
mod events;
mod handlers;
mod impls;
mod middlewares;
mod response;

use actix_web::web::{get, post, scope, Data};
use actix_web::HttpServer;
use events::AuthEvents;
use middlewares::auth::{Auth, JWT_SECRET};
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    std::env::set_var("RUST_LOG", "actix_web=info,kupolls=info");
    env_logger::init();
    let database_url = dotenv::var("DATABASE_URL").expect("environment variable DATABASE_URL not been set");
    let secret = dotenv::var(JWT_SECRET).expect("environment variable JWT_SECRET not been set");
    let addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_owned());
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(Auth::new(secret.as_bytes().to_owned()))
            .wrap(actix_web::middleware::NormalizePath::trim())
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(AuthEvents::default()))
            .service(
                scope("polls")
                    .route("", get().to(handlers::poll::index))
                    .route("{question_id}", get().to(handlers::poll::detail))
                    .route("{question_id}/results", get().to(handlers::poll::results))
                    .route("{question_id}/vote", post().to(handlers::vote::vote)),
            )
            .service(
                scope("accounts")
                    .route("login", post().to(handlers::account::login))
                    .route("logout", post().to(handlers::account::logout))
                    .route("signup", post().to(handlers::account::signup)),
            )
    })
    .bind(&addr)?
    .run()
    .await
}
