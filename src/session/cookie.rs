//! Cookie attributes and `Cookie` header parsing.

use axum::http::{header, HeaderMap};

#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub path: String,
    pub max_age_secs: i64,
}

impl CookieConfig {
    /// `Set-Cookie` value carrying `value`.
    pub fn build_set_cookie(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn build_delete_cookie(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=Lax");
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", max_age));
        cookie
    }
}

/// Value of the first cookie called `name` across all `Cookie` headers.
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> CookieConfig {
        CookieConfig {
            name: "RJ_session".into(),
            secure: true,
            http_only: true,
            path: "/".into(),
            max_age_secs: 60 * 60 * 24 * 30,
        }
    }

    #[test]
    fn set_cookie_carries_all_attributes() {
        let cookie = config().build_set_cookie("abc");
        assert_eq!(
            cookie,
            "RJ_session=abc; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=2592000"
        );
    }

    #[test]
    fn delete_cookie_expires_immediately() {
        let cookie = config().build_delete_cookie();
        assert!(cookie.starts_with("RJ_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn insecure_cookie_omits_secure_flag() {
        let mut cfg = config();
        cfg.secure = false;
        assert!(!cfg.build_set_cookie("v").contains("Secure"));
    }

    #[test]
    fn extracts_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; RJ_session=tok.en.sig; other=1"),
        );
        assert_eq!(extract_cookie(&headers, "RJ_session"), Some("tok.en.sig"));
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark"));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn extracts_from_any_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("RJ_session=x"));
        assert_eq!(extract_cookie(&headers, "RJ_session"), Some("x"));
    }
}
