use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rediscan_core::navigator::{navigation_error_to_status_code, NavigationError};

use super::html::HtmlTemplate;

/// Page shown when a query yields nothing (HTTP 404).
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    message: &'a str,
}

/// Page shown when the server fails (HTTP 500).
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    message: &'a str,
}

/// Renders the not-found page with the given reason.
pub fn not_found_page(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        HtmlTemplate(NotFoundTemplate { message }),
    )
        .into_response()
}

/// Renders the error page with the given status and message.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    (status, HtmlTemplate(ErrorTemplate { message })).into_response()
}

/// Application error type that wraps `anyhow::Error`.
///
/// Navigation errors keep their own status code: not-found conditions render
/// the 404 page, store failures the error page. Anything else is a 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        self.0
            .downcast_ref::<NavigationError>()
            .and_then(|err| StatusCode::from_u16(navigation_error_to_status_code(err)).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(reason = %message, "Not found");
            not_found_page(&message)
        } else {
            tracing::error!(error = %message, "Application error");
            error_page(status, &message)
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    not_found_page("Page not found")
}
