//! Domain error to HTTP envelope mapping

use actix_web::body::to_bytes;
use actix_web::http::StatusCode;

use cv_api::handlers::error::domain_error_response;
use cv_core::errors::DomainError;

async fn body_json(response: actix_web::HttpResponse) -> serde_json::Value {
    let bytes = to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[actix_rt::test]
async fn test_throttled_carries_retry_after_detail() {
    let response = domain_error_response(&DomainError::Throttled {
        retry_after_seconds: 1800,
    });
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "too_many_attempts");
    assert_eq!(json["details"]["retry_after"], 1800);
}

#[actix_rt::test]
async fn test_invalid_code_message_is_generic() {
    let response = domain_error_response(&DomainError::InvalidCode);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_code");
    assert_eq!(json["message"], "Invalid verification code.");
}

#[actix_rt::test]
async fn test_ambiguous_match_reports_multiple_users() {
    let response = domain_error_response(&DomainError::AmbiguousMatch);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "ambiguous_match");
    assert_eq!(json["message"], "Multiple users found.");
}

#[actix_rt::test]
async fn test_internal_error_detail_is_not_leaked() {
    let response = domain_error_response(&DomainError::internal("pool exhausted at 10.0.0.3"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["message"], "An internal error occurred");
    assert!(!json["message"].as_str().unwrap().contains("10.0.0.3"));
}

#[actix_rt::test]
async fn test_not_found_is_404_with_resource_name() {
    let response = domain_error_response(&DomainError::not_found("Resume"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Resume not found");
}
