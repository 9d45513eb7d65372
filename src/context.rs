use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::error::Error;

/// The authenticated requester, resolved by the auth middleware.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<Self>() {
            ready(Ok(user.clone()))
        } else {
            // anonymous callers of a protected handler are sent to login
            // with the original URL as the return path
            ready(Err(Error::Unauthenticated { next: req.path().to_owned() }))
        }
    }
}

/// Like `UserInfo` but never fails: pages that render for anonymous
/// visitors too (the poll detail page) use this.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserInfo>);

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(req.extensions().get::<UserInfo>().cloned())))
    }
}
