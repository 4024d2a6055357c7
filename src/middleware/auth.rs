use crate::error::AppError;
use axum::{extract::FromRequestParts, http::HeaderMap};

/// Caller identity for routes that accept but do not require a session
/// token.
///
/// No Authorization header resolves to `None` (the route stays public);
/// a bearer token that is present must verify, otherwise the request is
/// rejected outright rather than downgraded to an anonymous caller.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<i32>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_bearer_token(&parts.headers) else {
            return Ok(OptionalAuthUser(None));
        };

        let claims = crate::utils::jwt::decode_token(&token).map_err(|_| AppError::Unauthorized)?;

        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| AppError::Validation("Invalid user ID in token".to_string()))?;

        Ok(OptionalAuthUser(Some(user_id)))
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn empty_bearer_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer "),
        );
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(extract_bearer_token(&headers).is_none());
    }
}
