//! Session token extractor.
//!
//! Handlers that take an `AuthenticatedAccount` parameter only run
//! for requests carrying a valid `Authorization: Token <key>` header
//! that resolves to an active account. Everything else gets a 401
//! with the standard error envelope.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;

use cv_core::domain::entities::account::Account;
use cv_shared::types::response::ErrorResponse;

use crate::state::AppState;

const TOKEN_SCHEME: &str = "Token ";

/// The account resolved from the request's session token
pub struct AuthenticatedAccount {
    pub account: Account,
    /// Raw token, kept so logout can invalidate it
    pub token: String,
}

fn unauthorized() -> actix_web::Error {
    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(
        "unauthorized",
        "Authentication credentials were not provided or are invalid",
    ));
    actix_web::error::InternalError::from_response("unauthorized", response).into()
}

fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(TOKEN_SCHEME)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl FromRequest for AuthenticatedAccount {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState missing from request extensions");
                actix_web::error::ErrorInternalServerError("application state unavailable")
            })?;
            let token = token.ok_or_else(unauthorized)?;

            match state.auth.authenticate(&token).await {
                Ok(account) => Ok(AuthenticatedAccount { account, token }),
                Err(e) => {
                    tracing::debug!(error = %e, "Token authentication failed");
                    Err(unauthorized())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_token_requires_scheme() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc123"))
            .to_http_request();
        assert!(extract_token(&req).is_none());
    }

    #[test]
    fn test_extract_token_strips_scheme() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token abc123"))
            .to_http_request();
        assert_eq!(extract_token(&req).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_token_rejects_empty() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token "))
            .to_http_request();
        assert!(extract_token(&req).is_none());
    }

    #[test]
    fn test_extract_token_missing_header() {
        let req = TestRequest::default().to_http_request();
        assert!(extract_token(&req).is_none());
    }
}
