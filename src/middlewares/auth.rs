use std::future::Future;
use std::pin::Pin;

use actix_web::dev::{Service, ServiceRequest, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage};
use serde::{Deserialize, Serialize};

use crate::context::UserInfo;
use crate::core::tokener::{Payload, Tokener};
use crate::impls::tokener::jwt::Jwt;

pub static JWT_TOKEN: &str = "JWT_TOKEN";
pub static JWT_SECRET: &str = "JWT_SECRET";

#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    pub sub: String,
    pub username: String,
    pub exp: i64,
}

impl Payload for Claim {
    fn user(&self) -> &str {
        &self.sub
    }
}

/// Resolves the requester from the JWT cookie (or a bearer header) into a
/// `UserInfo` request extension. Anonymous and bad-token requests pass
/// through untouched: handlers that need a user demand it via the
/// `UserInfo` extractor, which answers with a login redirect.
pub struct Auth {
    secret: Vec<u8>,
}

impl Auth {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for Auth
where
    S: Service<ServiceRequest> + 'static,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Error = Error;
    type Response = S::Response;
    type Transform = AuthService<S>;
    type InitError = ();
    type Future = Pin<Box<dyn Future<Output = Result<Self::Transform, Self::InitError>>>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let secret = self.secret.clone();
        Box::pin(async move {
            Ok(AuthService {
                tokener: Jwt::new(secret),
                next_service: service,
            })
        })
    }
}

pub struct AuthService<S> {
    tokener: Jwt,
    next_service: S,
}

impl<S> AuthService<S> {
    fn token_of(&self, req: &ServiceRequest) -> Option<String> {
        if let Some(cookie) = req.cookie(JWT_TOKEN) {
            return Some(cookie.value().to_owned());
        }
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|h| h.trim_start_matches("Bearer ").to_owned())
    }
}

impl<S> Service<ServiceRequest> for AuthService<S>
where
    S: Service<ServiceRequest>,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx).map_err(|e| e.into())
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = self.token_of(&req) {
            if let Ok(claim) = <Jwt as Tokener<Claim>>::verify_token(&self.tokener, &token) {
                if let Ok(id) = claim.user().parse::<i32>() {
                    req.extensions_mut().insert(UserInfo { id, username: claim.username });
                }
            }
        }
        let res_fut = self.next_service.call(req);
        Box::pin(async move { res_fut.await.map_err(|e| e.into()) })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use chrono::{Duration, Utc};
    use std::ops::Add;

    async fn whoami(user: UserInfo) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    fn token(secret: &[u8]) -> String {
        let jwt = Jwt::new(secret.to_vec());
        jwt.gen_token(&Claim {
            sub: "7".into(),
            username: "tester".into(),
            exp: Utc::now().add(Duration::days(1)).timestamp(),
        })
        .unwrap()
    }

    #[actix_web::test]
    async fn test_anonymous_vote_post_redirects_to_login() {
        let app = test::init_service(
            App::new()
                .wrap(Auth::new(b"secret".to_vec()))
                .route("/polls/1/vote", web::post().to(whoami)),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::post().uri("/polls/1/vote").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert_eq!(location, "/accounts/login?next=%2Fpolls%2F1%2Fvote");
    }

    #[actix_web::test]
    async fn test_cookie_token_resolves_the_user() {
        let app = test::init_service(
            App::new()
                .wrap(Auth::new(b"secret".to_vec()))
                .route("/polls/1/vote", web::post().to(whoami)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/polls/1/vote")
            .cookie(Cookie::new(JWT_TOKEN, token(b"secret")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"tester"));
    }

    #[actix_web::test]
    async fn test_forged_token_stays_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(Auth::new(b"secret".to_vec()))
                .route("/polls/1/vote", web::post().to(whoami)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/polls/1/vote")
            .cookie(Cookie::new(JWT_TOKEN, token(b"wrong secret")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }
}
