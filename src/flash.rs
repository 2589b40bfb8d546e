use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const FLASH_COOKIE: &str = "redirect_flash";

/// How long an unread message waits for its page render
pub const FLASH_TTL: Duration = Duration::from_secs(300);

/// Most unread messages held at once
pub const FLASH_CAPACITY: usize = 1024;

struct Slot {
    message: String,
    stored_at: Instant,
}

/// Read-once status messages for the admin back office
///
/// A mutating request parks its message under the client's session id; the
/// next page render for that session takes it out again. Slots hold at most
/// one message, so a newer one replaces an unread older one. Messages nobody
/// collects expire after the TTL, and when the map is full the oldest slot
/// is dropped to make room.
#[derive(Clone)]
pub struct FlashMessages {
    slots: Arc<DashMap<Uuid, Slot>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for FlashMessages {
    fn default() -> Self {
        Self::with_limits(FLASH_TTL, FLASH_CAPACITY)
    }
}

impl FlashMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn put(&self, session: Uuid, message: impl Into<String>) {
        self.slots.retain(|_, slot| slot.stored_at.elapsed() < self.ttl);

        if !self.slots.contains_key(&session) {
            while self.slots.len() >= self.capacity {
                let Some(oldest) = self.oldest() else { break };
                self.slots.remove(&oldest);
                tracing::debug!("Dropped unread flash message for session {}", oldest);
            }
        }

        self.slots.insert(
            session,
            Slot {
                message: message.into(),
                stored_at: Instant::now(),
            },
        );
    }

    pub fn take(&self, session: Uuid) -> Option<String> {
        self.slots
            .remove(&session)
            .map(|(_, slot)| slot)
            .filter(|slot| slot.stored_at.elapsed() < self.ttl)
            .map(|slot| slot.message)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    fn oldest(&self) -> Option<Uuid> {
        self.slots
            .iter()
            .min_by_key(|entry| entry.value().stored_at)
            .map(|entry| *entry.key())
    }
}

/// Session id carried by the flash cookie, if the client sent a valid one
pub fn session_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Cookie binding a client to `session`
pub fn session_cookie(session: Uuid, cookie_path: &str) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, session.to_string()))
        .path(cookie_path.to_owned())
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_take_is_read_once() {
        let flash = FlashMessages::new();
        let session = Uuid::new_v4();

        flash.put(session, "Created route /x");
        assert_eq!(flash.take(session).as_deref(), Some("Created route /x"));
        assert_eq!(flash.take(session), None);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let flash = FlashMessages::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        flash.put(a, "for a");
        assert_eq!(flash.take(b), None);
        assert_eq!(flash.take(a).as_deref(), Some("for a"));
    }

    #[test]
    fn test_newer_message_replaces_older() {
        let flash = FlashMessages::new();
        let session = Uuid::new_v4();

        flash.put(session, "first");
        flash.put(session, "second");
        assert_eq!(flash.len(), 1);
        assert_eq!(flash.take(session).as_deref(), Some("second"));
    }

    #[test]
    fn test_expired_message_is_not_shown() {
        let flash = FlashMessages::with_limits(Duration::ZERO, 16);
        let session = Uuid::new_v4();

        flash.put(session, "stale");
        assert_eq!(flash.take(session), None);
    }

    #[test]
    fn test_put_sweeps_expired_slots() {
        let flash = FlashMessages::with_limits(Duration::ZERO, 16);
        for _ in 0..10 {
            flash.put(Uuid::new_v4(), "never collected");
        }
        assert_eq!(flash.len(), 1);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let flash = FlashMessages::with_limits(Duration::from_secs(60), 3);
        let sessions: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
        for (i, session) in sessions.iter().enumerate() {
            flash.put(*session, format!("message {}", i));
        }

        assert_eq!(flash.len(), 3);
        assert_eq!(flash.take(sessions[0]), None);
        assert_eq!(flash.take(sessions[9]).as_deref(), Some("message 9"));
    }

    #[test]
    fn test_session_from_jar() {
        let session = Uuid::new_v4();
        let jar = jar_with(&format!("theme=dark; {}={}", FLASH_COOKIE, session));
        assert_eq!(session_from_jar(&jar), Some(session));
    }

    #[test]
    fn test_session_from_jar_rejects_garbage() {
        assert_eq!(session_from_jar(&CookieJar::new()), None);

        let jar = jar_with(&format!("{}=not-a-uuid", FLASH_COOKIE));
        assert_eq!(session_from_jar(&jar), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let session = Uuid::new_v4();
        let cookie = session_cookie(session, "/admin");

        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), session.to_string());
        assert_eq!(cookie.path(), Some("/admin"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let jar = jar_with(&format!("{}={}", cookie.name(), cookie.value()));
        assert_eq!(session_from_jar(&jar), Some(session));
    }
}
