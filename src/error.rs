use askama::Template;
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::{store::StoreError, views::ErrorPage};

const UNEXPECTED: &str = "Something unexpected went wrong. Sorry about that.";

/// Everything a handler can short-circuit with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("redirect to {location}")]
    Redirect {
        location: String,
        set_cookie: Option<String>,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {message}")]
    Unauthorized {
        message: String,
        login_href: Option<String>,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            login_href: None,
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
            set_cookie: None,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::Unexpected(e.into())
    }
}

/// 302 to `location`, optionally setting a cookie on the way.
pub fn found(location: &str, set_cookie: Option<&str>) -> Response {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(location) {
        Ok(v) => {
            headers.insert(header::LOCATION, v);
        }
        Err(e) => {
            error!(error = %e, %location, "invalid redirect location");
            return AppError::Unexpected(e.into()).into_response();
        }
    }
    if let Some(cookie) = set_cookie {
        match HeaderValue::from_str(cookie) {
            Ok(v) => {
                headers.insert(header::SET_COOKIE, v);
            }
            Err(e) => {
                error!(error = %e, "invalid Set-Cookie value");
                return AppError::Unexpected(e.into()).into_response();
            }
        }
    }
    (StatusCode::FOUND, headers).into_response()
}

fn error_page(status: StatusCode, message: String, login_href: Option<String>) -> Response {
    let page = ErrorPage {
        title: status.canonical_reason().unwrap_or("Uh-oh!").to_string(),
        status: status.as_u16(),
        message,
        login_href,
    };
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "error page render failed");
            (status, page.message).into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Redirect {
                location,
                set_cookie,
            } => found(&location, set_cookie.as_deref()),
            AppError::BadRequest(message) => error_page(StatusCode::BAD_REQUEST, message, None),
            AppError::Unauthorized {
                message,
                login_href,
            } => error_page(StatusCode::UNAUTHORIZED, message, login_href),
            AppError::NotFound(message) => error_page(StatusCode::NOT_FOUND, message, None),
            AppError::Unexpected(e) => {
                error!(error = ?e, "unexpected error");
                error_page(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED.into(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_is_302_with_location_and_cookie() {
        let res = AppError::Redirect {
            location: "/login".into(),
            set_cookie: Some("RJ_session=; Max-Age=0".into()),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/login");
        assert_eq!(res.headers()[header::SET_COOKIE], "RJ_session=; Max-Age=0");
    }

    #[test]
    fn typed_failures_map_to_status() {
        assert_eq!(
            AppError::NotFound("gone".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unauthorized("nope").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::BadRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unexpected_errors_are_not_leaked() {
        let res = AppError::Unexpected(anyhow::anyhow!("connection refused on 10.0.0.5"))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_become_unexpected() {
        let err: AppError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, AppError::Unexpected(_)));
    }
}
