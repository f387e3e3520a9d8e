//! Bearer token resolution.
//!
//! The token travels in the `Auth-Token` header or, when the header is absent,
//! in a cookie of the same name. Once a header value is present it is the
//! token, whatever it holds, and the cookie jar is never parsed.

use std::collections::HashMap;
use std::fmt;

use axum::http::{HeaderMap, HeaderName, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

/// Name shared by the header and the cookie.
pub const AUTH_TOKEN: &str = "Auth-Token";

pub const AUTH_TOKEN_HEADER: HeaderName = HeaderName::from_static("auth-token");

/// Opaque session token. The identity provider owns its meaning.
///
/// `Debug` prints the fingerprint only, so a token can be passed to `tracing`
/// fields without leaking the credential.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short, non-reversible tag for log correlation (base64url of the first
    /// 6 bytes of SHA-256).
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        URL_SAFE_NO_PAD.encode(&digest[..6])
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.fingerprint()).finish()
    }
}

/// Cookies sent with a request, keyed by name.
///
/// Built from every `Cookie` header (HTTP/2 clients may split the jar across
/// several). When a name repeats, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct CookieMap {
    cookies: HashMap<String, String>,
}

impl CookieMap {
    /// Returns `None` when the request carries no `Cookie` header at all.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let mut values = headers.get_all(header::COOKIE).iter().peekable();
        values.peek()?;

        let mut cookies = HashMap::new();
        for value in values {
            let Ok(raw) = value.to_str() else {
                tracing::debug!("skipping non-ascii cookie header");
                continue;
            };

            for pair in raw.split(';') {
                let Some((name, value)) = pair.trim().split_once('=') else {
                    continue;
                };
                cookies
                    .entry(name.trim().to_string())
                    .or_insert_with(|| unquote(value.trim()).to_string());
            }
        }

        Some(Self { cookies })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cookies = HashMap::new();
        for (name, value) in iter {
            cookies.entry(name.into()).or_insert_with(|| value.into());
        }
        Self { cookies }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Extracts the session token from a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenResolver;

impl TokenResolver {
    pub fn resolve(&self, headers: &HeaderMap) -> Option<Token> {
        if let Some(token) = self.header_token(headers) {
            return Some(token);
        }
        self.cookie_token(CookieMap::from_headers(headers).as_ref())
    }

    /// Resolves from already separated sources: the `Auth-Token` header values
    /// in arrival order and the request's cookie map, if it has one.
    pub fn from_sources<'a, I>(&self, header_values: I, cookies: Option<&CookieMap>) -> Option<Token>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match header_values.into_iter().next() {
            Some(first) => Some(Token::new(first)),
            None => self.cookie_token(cookies),
        }
    }

    // Only the first value counts; later duplicates are ignored. A blank or
    // undecodable value is still the token, the provider rejects it.
    fn header_token(&self, headers: &HeaderMap) -> Option<Token> {
        let first = headers.get_all(AUTH_TOKEN_HEADER).iter().next()?;
        Some(Token::new(String::from_utf8_lossy(first.as_bytes())))
    }

    fn cookie_token(&self, cookies: Option<&CookieMap>) -> Option<Token> {
        // A jar without our entry is just "no token".
        let cookies = cookies?;
        cookies.get(AUTH_TOKEN).map(Token::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn no_header_and_no_cookie_is_absent() {
        assert_eq!(TokenResolver.resolve(&HeaderMap::new()), None);
    }

    #[test]
    fn first_header_value_wins() {
        let map = headers(&[("Auth-Token", "abc"), ("Auth-Token", "def")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("abc")));
    }

    #[test]
    fn header_takes_precedence_over_cookie() {
        let map = headers(&[("Auth-Token", "from-header"), ("Cookie", "Auth-Token=from-cookie")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("from-header")));
    }

    #[test]
    fn header_values_skip_cookie_lookup() {
        let cookies: CookieMap = [(AUTH_TOKEN, "from-cookie")].into_iter().collect();
        let token = TokenResolver.from_sources(["abc", "def"], Some(&cookies));
        assert_eq!(token, Some(Token::new("abc")));
    }

    #[test]
    fn falls_back_to_cookie() {
        let map = headers(&[("Cookie", "theme=dark; Auth-Token=xyz; lang=en")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("xyz")));
    }

    #[test]
    fn cookie_map_without_token_entry_is_absent() {
        let map = headers(&[("Cookie", "theme=dark; lang=en")]);
        let cookies = CookieMap::from_headers(&map).unwrap();
        assert_eq!(cookies.get("theme"), Some("dark"));

        assert_eq!(TokenResolver.from_sources([], Some(&cookies)), None);
        assert_eq!(TokenResolver.resolve(&map), None);
    }

    #[test]
    fn empty_cookie_map_is_absent() {
        let cookies = CookieMap::default();
        assert_eq!(TokenResolver.from_sources([], Some(&cookies)), None);
        assert_eq!(TokenResolver.from_sources([], None), None);
    }

    #[test]
    fn cookie_jar_split_across_headers() {
        let map = headers(&[("Cookie", "theme=dark"), ("Cookie", "Auth-Token=split")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("split")));
    }

    #[test]
    fn cookie_name_is_case_sensitive() {
        let map = headers(&[("Cookie", "auth-token=lower")]);
        assert_eq!(TokenResolver.resolve(&map), None);
    }

    #[test]
    fn quoted_cookie_value_is_unquoted() {
        let map = headers(&[("Cookie", "Auth-Token=\"quoted\"")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("quoted")));
    }

    #[test]
    fn blank_header_still_shadows_cookie() {
        let map = headers(&[("Auth-Token", ""), ("Cookie", "Auth-Token=cookie")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("")));

        let cookies: CookieMap = [(AUTH_TOKEN, "cookie")].into_iter().collect();
        assert_eq!(
            TokenResolver.from_sources([""], Some(&cookies)),
            Some(Token::new(""))
        );
    }

    #[test]
    fn non_ascii_header_still_shadows_cookie() {
        let mut map = headers(&[("Cookie", "Auth-Token=cookie")]);
        map.append(
            AUTH_TOKEN_HEADER,
            HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        );

        let token = TokenResolver.resolve(&map).unwrap();
        assert_ne!(token, Token::new("cookie"));
    }

    #[test]
    fn malformed_cookie_pairs_are_skipped() {
        let map = headers(&[("Cookie", "garbage; =; Auth-Token=ok")]);
        assert_eq!(TokenResolver.resolve(&map), Some(Token::new("ok")));
    }

    #[test]
    fn debug_output_does_not_contain_the_token() {
        let token = Token::new("super-secret-value");
        let printed = format!("{token:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains(&token.fingerprint()));
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(Token::new("abc").fingerprint(), Token::new("abc").fingerprint());
        assert_ne!(Token::new("abc").fingerprint(), Token::new("abd").fingerprint());
        assert_eq!(Token::new("abc").fingerprint().len(), 8);
    }
}
