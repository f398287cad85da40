//! Credential extraction from request headers.
//!
//! A bearer credential can arrive on the `Authorization` header directly or
//! inside the `Cookie` header as an `Authorization=<value>` pair (browser
//! clients behind a forward-auth proxy). The header wins when both are
//! present. `X-Forwarded-Method: OPTIONS` short-circuits as a CORS
//! preflight with no credential processing at all.

use axum::http::HeaderMap;
use sesame_common::error::AuthError;

/// Outcome of credential extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// CORS preflight forwarded by the proxy — succeed with no body.
    Preflight,
    /// A parsed `<scheme> <token>` credential.
    Credential {
        scheme: String,
        token: String,
        /// `x-email` header, used solely for the test-account bypass.
        email_hint: Option<String>,
    },
}

/// Locate and parse the bearer credential in a request's headers.
pub fn extract_credential(headers: &HeaderMap) -> Result<Extraction, AuthError> {
    if header_str(headers, "x-forwarded-method") == Some("OPTIONS") {
        return Ok(Extraction::Preflight);
    }

    let email_hint = header_str(headers, "x-email").map(str::to_owned);

    let from_cookie = header_str(headers, "cookie").and_then(cookie_authorization);
    let from_header = header_str(headers, "authorization").map(str::to_owned);

    // Header wins over cookie when both transports carry a value.
    let raw = from_header
        .or(from_cookie)
        .ok_or(AuthError::MissingAuthorization)?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => Ok(Extraction::Credential {
            scheme: scheme.to_string(),
            token: token.to_string(),
            email_hint,
        }),
        _ => Err(AuthError::MalformedAuthorization),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Find the `Authorization` cookie value, if any.
///
/// Explicit parser instead of a regex: split on `;`, trim, split each
/// segment on the first `=`, exact-match the key. The cookie key is
/// case-sensitive.
fn cookie_authorization(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|segment| {
        let (key, value) = segment.trim().split_once('=')?;
        (key == "Authorization" && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    fn token_of(extraction: Extraction) -> String {
        match extraction {
            Extraction::Credential { token, .. } => token,
            other => panic!("expected credential, got {other:?}"),
        }
    }

    #[test]
    fn options_preflight_short_circuits() {
        let h = headers(&[("x-forwarded-method", "OPTIONS")]);
        assert_eq!(extract_credential(&h).unwrap(), Extraction::Preflight);

        // Even with no credential at all.
        let h = headers(&[("x-forwarded-method", "OPTIONS"), ("cookie", "a=b")]);
        assert_eq!(extract_credential(&h).unwrap(), Extraction::Preflight);
    }

    #[test]
    fn other_forwarded_methods_do_not_short_circuit() {
        let h = headers(&[
            ("x-forwarded-method", "GET"),
            ("authorization", "Bearer abc"),
        ]);
        assert_eq!(token_of(extract_credential(&h).unwrap()), "abc");
    }

    #[test]
    fn header_wins_over_cookie() {
        let h = headers(&[
            ("cookie", "Authorization=Bearer xyz"),
            ("authorization", "Bearer abc"),
        ]);
        assert_eq!(token_of(extract_credential(&h).unwrap()), "abc");
    }

    #[test]
    fn cookie_alone_is_used() {
        let h = headers(&[("cookie", "session=1; Authorization=Bearer xyz; theme=dark")]);
        assert_eq!(token_of(extract_credential(&h).unwrap()), "xyz");
    }

    #[test]
    fn cookie_key_is_case_sensitive() {
        let h = headers(&[("cookie", "authorization=Bearer xyz")]);
        assert!(matches!(
            extract_credential(&h),
            Err(AuthError::MissingAuthorization)
        ));
    }

    #[test]
    fn empty_cookie_value_is_ignored() {
        let h = headers(&[("cookie", "Authorization=; other=1")]);
        assert!(matches!(
            extract_credential(&h),
            Err(AuthError::MissingAuthorization)
        ));
    }

    #[test]
    fn missing_everything_is_missing_authorization() {
        let h = headers(&[]);
        assert!(matches!(
            extract_credential(&h),
            Err(AuthError::MissingAuthorization)
        ));
    }

    #[test]
    fn scheme_without_token_is_malformed() {
        let h = headers(&[("authorization", "onlyscheme")]);
        assert!(matches!(
            extract_credential(&h),
            Err(AuthError::MalformedAuthorization)
        ));
    }

    #[test]
    fn too_many_parts_is_malformed() {
        let h = headers(&[("authorization", "Bearer abc def")]);
        assert!(matches!(
            extract_credential(&h),
            Err(AuthError::MalformedAuthorization)
        ));
    }

    #[test]
    fn scheme_and_email_hint_are_captured() {
        let h = headers(&[
            ("authorization", "Bearer abc"),
            ("x-email", "sandbox@example.com"),
        ]);
        match extract_credential(&h).unwrap() {
            Extraction::Credential {
                scheme,
                token,
                email_hint,
            } => {
                assert_eq!(scheme, "Bearer");
                assert_eq!(token, "abc");
                assert_eq!(email_hint.as_deref(), Some("sandbox@example.com"));
            }
            other => panic!("expected credential, got {other:?}"),
        }
    }

    #[test]
    fn adversarial_cookies_do_not_confuse_the_parser() {
        // Values containing '=' keep everything after the first '='.
        let h = headers(&[("cookie", "Authorization=Bearer a=b")]);
        assert_eq!(token_of(extract_credential(&h).unwrap()), "a=b");

        // Whitespace-heavy segments are trimmed per segment.
        let h = headers(&[("cookie", "  a=1 ;   Authorization=Bearer xyz ;b=2")]);
        assert_eq!(token_of(extract_credential(&h).unwrap()), "xyz");

        // A key that merely contains "Authorization" does not match.
        let h = headers(&[("cookie", "XAuthorization=Bearer xyz")]);
        assert!(matches!(
            extract_credential(&h),
            Err(AuthError::MissingAuthorization)
        ));
    }
}
