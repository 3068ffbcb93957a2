// src/utils/admin_session.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::utils::token::{ADMIN_TOKEN_LEN, generate_token};

/// Name of the admin capability cookie.
pub const ADMIN_COOKIE: &str = "admin_token";

const DEFAULT_TTL: Duration = Duration::from_secs(8 * 3600);

/// In-process store of active admin tokens, mapping token -> expiry.
///
/// Single-instance by design: tokens live in process memory and die with it.
/// Expired entries are swept whenever the store is consulted, so the map
/// stays bounded by the number of logins per TTL window.
#[derive(Clone)]
pub struct AdminSessions {
    ttl: Duration,
    inner: Arc<Mutex<HashMap<String, Instant>>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Custom TTL, used by tests to exercise expiry without waiting 8 hours.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Mints a fresh token and registers it with the configured TTL.
    pub fn issue(&self) -> String {
        let token = generate_token(ADMIN_TOKEN_LEN);
        let mut map = self.inner.lock().expect("admin session lock poisoned");
        map.insert(token.clone(), Instant::now() + self.ttl);
        token
    }

    /// Checks a token, sweeping out expired entries first.
    pub fn is_valid(&self, token: &str) -> bool {
        let now = Instant::now();
        let mut map = self.inner.lock().expect("admin session lock poisoned");
        map.retain(|_, expiry| *expiry > now);
        map.contains_key(token)
    }

    pub fn revoke(&self, token: &str) {
        let mut map = self.inner.lock().expect("admin session lock poisoned");
        map.remove(token);
    }

    /// Cookie Max-Age matching the store TTL, in seconds.
    pub fn max_age_secs(&self) -> u64 {
        self.ttl.as_secs()
    }
}

impl Default for AdminSessions {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts a cookie value from a request's `Cookie` header.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

/// Axum Middleware: Admin gate.
///
/// Rejects with 401 unless the request carries an `admin_token` cookie that
/// is present and unexpired in the store. The login form itself lives in the
/// rendering layer; the API only answers 401.
pub async fn admin_guard(
    State(sessions): State<AdminSessions>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    match cookie_value(req.headers(), ADMIN_COOKIE) {
        Some(token) if sessions.is_valid(token) => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
