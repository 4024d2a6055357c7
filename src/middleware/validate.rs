use crate::error::AppError;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};

const SIGNUP_BODY_LIMIT: usize = 64 * 1024;

/// Field-presence gate ahead of the signup handler. Rejects bodies that
/// are missing required fields before any deserialization or store work
/// happens; the buffered body is handed back to the handler untouched.
pub async fn validate_signup_middleware(
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, SIGNUP_BODY_LIMIT)
        .await
        .map_err(|_| AppError::Validation("Invalid request body".to_string()))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|_| AppError::Validation("Invalid JSON body".to_string()))?;

    if !has_required_fields(&value) {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

/// Plain signup needs fullName/email/password; a body flagged with
/// `isGoogleSignIn` needs the identity token instead.
fn has_required_fields(body: &serde_json::Value) -> bool {
    let is_google = body
        .get("isGoogleSignIn")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if is_google {
        has_string(body, "token")
    } else {
        has_string(body, "fullName") && has_string(body, "email") && has_string(body, "password")
    }
}

fn has_string(body: &serde_json::Value, field: &str) -> bool {
    body.get(field)
        .and_then(|v| v.as_str())
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_signup_with_all_fields_passes() {
        let body = json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "secret123"
        });
        assert!(has_required_fields(&body));
    }

    #[test]
    fn plain_signup_missing_password_fails() {
        let body = json!({ "fullName": "Ada Lovelace", "email": "ada@example.com" });
        assert!(!has_required_fields(&body));
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let body = json!({ "fullName": "", "email": "ada@example.com", "password": "x" });
        assert!(!has_required_fields(&body));
    }

    #[test]
    fn google_signup_needs_only_token() {
        let body = json!({ "isGoogleSignIn": true, "token": "opaque-id-token" });
        assert!(has_required_fields(&body));
    }

    #[test]
    fn google_signup_without_token_fails() {
        let body = json!({ "isGoogleSignIn": true });
        assert!(!has_required_fields(&body));
    }

    #[test]
    fn google_flag_false_falls_back_to_plain_rules() {
        let body = json!({ "isGoogleSignIn": false, "token": "opaque-id-token" });
        assert!(!has_required_fields(&body));
    }
}
