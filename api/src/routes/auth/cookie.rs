//! Refresh-token cookie construction
//!
//! The cookie is HTTP-only and scoped to the auth prefix; its lifetime
//! equals the refresh TTL. Non-browser clients may send the token in the
//! request body instead, and the body wins when both are present.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use crate::config::Config;

/// Build the refresh cookie for a newly issued token
pub fn refresh_cookie(config: &Config, token: &str) -> Cookie<'static> {
    let same_site = if config.is_production() {
        SameSite::Strict
    } else {
        SameSite::Lax
    };

    Cookie::build(config.cookie.name.clone(), token.to_string())
        .path(config.cookie.path.clone())
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(same_site)
        .max_age(Duration::seconds(config.jwt.refresh_token_expiry))
        .finish()
}

/// Build the clearing cookie sent on logout
pub fn clear_refresh_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = refresh_cookie(config, "");
    cookie.set_max_age(Duration::ZERO);
    cookie
}

/// Resolve the presented refresh token from body or cookie
pub fn extract_refresh_token(
    req: &HttpRequest,
    body_token: Option<String>,
    config: &Config,
) -> Option<String> {
    body_token.or_else(|| {
        req.cookie(&config.cookie.name)
            .map(|cookie| cookie.value().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let config = Config::default();
        let cookie = refresh_cookie(&config, "token-value");

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.path(), Some("/api/v1/auth"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(Duration::seconds(config.jwt.refresh_token_expiry))
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = Config::default();
        let cookie = clear_refresh_cookie(&config);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
