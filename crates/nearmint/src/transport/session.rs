use reqwest::cookie::Jar;
use std::sync::Arc;

/// A cookie/session store shared by every endpoint built from it.
///
/// Cloning a `Session` clones the handle, not the cookies: all clones read
/// and write the same jar. Build one per process (or one per test) and pass
/// it to each [`HttpTransport`](crate::HttpTransport).
#[derive(Clone, Debug, Default)]
pub struct Session {
    jar: Arc<Jar>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::cookie::CookieStore;
    use reqwest::header::HeaderValue;

    #[test]
    fn clones_share_cookies() {
        let url: reqwest::Url = "https://rpc.example.org/".parse().unwrap();
        let session = Session::new();
        let other = session.clone();

        session.jar().add_cookie_str("sid=abc123; Path=/", &url);

        let cookies = other.jar().cookies(&url);
        assert_eq!(cookies, Some(HeaderValue::from_static("sid=abc123")));
    }

    #[test]
    fn fresh_sessions_are_isolated() {
        let url: reqwest::Url = "https://rpc.example.org/".parse().unwrap();
        let first = Session::new();
        let second = Session::new();

        first.jar().add_cookie_str("sid=abc123; Path=/", &url);

        assert!(second.jar().cookies(&url).is_none());
    }
}
