use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use crate::auth::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the bearer credential out of the `Authorization` header
///
/// A leading `"Bearer "` is stripped when present. A bare token without the
/// scheme is accepted as-is for older clients.
///
/// # Errors
/// Returns `AuthError::MissingToken` if the header is absent, not valid
/// visible ASCII, or empty once the scheme is removed
pub fn extract_bearer(headers: &HeaderMap) -> AuthResult<String> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        map
    }

    #[test]
    fn test_strips_bearer_prefix() {
        let map = headers(&[("authorization", "Bearer abc123")]);
        assert_eq!(extract_bearer(&map).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_header() {
        let map = headers(&[]);
        assert!(matches!(extract_bearer(&map), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_empty_header() {
        let map = headers(&[("authorization", "")]);
        assert!(matches!(extract_bearer(&map), Err(AuthError::MissingToken)));

        let map = headers(&[("authorization", "Bearer ")]);
        assert!(matches!(extract_bearer(&map), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_accepts_token_without_scheme() {
        let map = headers(&[("authorization", "abc123")]);
        assert_eq!(extract_bearer(&map).unwrap(), "abc123");
    }

    #[test]
    fn test_ignores_other_headers() {
        let map = headers(&[("x-api-key", "Bearer abc123"), ("cookie", "token=abc")]);
        assert!(matches!(extract_bearer(&map), Err(AuthError::MissingToken)));
    }
}
