use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::dotenv::Error as DotError;
use crate::jsonwebtoken::errors::Error as JsonWebTokenError;
use crate::response::redirect_with;
use crate::sqlx::Error as SqlxError;
use crate::thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("jwt error")]
    JWTError(#[from] JsonWebTokenError),

    #[error("dotenv error")]
    DotEnvError(#[from] DotError),

    #[error("login required")]
    Unauthenticated { next: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NotVotable(String),

    #[error("invalid choice")]
    InvalidChoice,

    #[error("business error: {0}")]
    BusinessError(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } | Error::NotFound(_) | Error::NotVotable(_) => StatusCode::FOUND,
            Error::InvalidChoice | Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // the user is never left on a dead page: back to login or the
            // poll index with a flash message
            Error::Unauthenticated { next } => redirect_with("/accounts/login", &[("next", next)]),
            Error::NotFound(msg) | Error::NotVotable(msg) => redirect_with("/polls", &[("error", msg)]),
            Error::InvalidChoice | Error::BusinessError(_) => HttpResponse::build(StatusCode::BAD_REQUEST).body(self.to_string()),
            _ => HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).finish(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::http::header;

    fn location(resp: &HttpResponse) -> String {
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_owned()
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_with_next() {
        let resp = Error::Unauthenticated {
            next: "/polls/3/vote".into(),
        }
        .error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/accounts/login?next=%2Fpolls%2F3%2Fvote");
    }

    #[test]
    fn test_not_found_redirects_to_index_with_message() {
        let resp = Error::NotFound("The requested poll does not exist.".into()).error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(location(&resp).starts_with("/polls?error="));
    }

    #[test]
    fn test_not_votable_redirects_to_index_with_message() {
        let resp = Error::NotVotable("Voting is not allowed for this poll.".into()).error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(location(&resp).starts_with("/polls?error="));
    }

    #[test]
    fn test_invalid_choice_is_a_bad_request() {
        assert_eq!(Error::InvalidChoice.status_code(), StatusCode::BAD_REQUEST);
    }
}
