//! Cookie Pair Entity
//!
//! The two client-side artifacts: the long-lived session cookie and the
//! short-lived token cookie. They are set and cleared independently.
//!
//! Use cases never touch headers. They describe their effect as
//! [`CookieWrites`], which the presentation layer renders as `Set-Cookie`
//! headers and which [`CookiePair::apply`] replays the way a browser would.

/// Which of the two cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookieKind {
    Session,
    Token,
}

/// One change to the browser's cookie jar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieWrite {
    Set(CookieKind, String),
    Clear(CookieKind),
}

/// Ordered cookie changes produced by one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieWrites(Vec<CookieWrite>);

impl CookieWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: CookieKind, value: impl Into<String>) {
        self.0.push(CookieWrite::Set(kind, value.into()));
    }

    pub fn clear(&mut self, kind: CookieKind) {
        self.0.push(CookieWrite::Clear(kind));
    }

    /// Both cookies cleared
    pub fn clear_all() -> Self {
        Self(vec![
            CookieWrite::Clear(CookieKind::Session),
            CookieWrite::Clear(CookieKind::Token),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CookieWrite> {
        self.0.iter()
    }

    /// Whether `kind` is cleared by these writes
    pub fn clears(&self, kind: CookieKind) -> bool {
        self.0.contains(&CookieWrite::Clear(kind))
    }

    pub fn extend(&mut self, other: CookieWrites) {
        self.0.extend(other.0);
    }
}

impl IntoIterator for CookieWrites {
    type Item = CookieWrite;
    type IntoIter = std::vec::IntoIter<CookieWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Observable state of the pair
///
/// `Pending` (login in flight) exists only inside a request and is never
/// visible in a jar, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookiePairState {
    Absent,
    SessionOnly,
    TokenOnly,
    Present,
}

/// Cookie values as sent by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookiePair {
    pub session: Option<String>,
    pub token: Option<String>,
}

impl CookiePair {
    pub fn new(session: Option<String>, token: Option<String>) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            session: non_empty(session),
            token: non_empty(token),
        }
    }

    pub fn get(&self, kind: CookieKind) -> Option<&str> {
        match kind {
            CookieKind::Session => self.session.as_deref(),
            CookieKind::Token => self.token.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.session.is_none() && self.token.is_none()
    }

    /// Presence-only check used by the inbound gate: either cookie counts
    pub fn is_authenticated(&self) -> bool {
        !self.is_empty()
    }

    pub fn state(&self) -> CookiePairState {
        match (&self.session, &self.token) {
            (None, None) => CookiePairState::Absent,
            (Some(_), None) => CookiePairState::SessionOnly,
            (None, Some(_)) => CookiePairState::TokenOnly,
            (Some(_), Some(_)) => CookiePairState::Present,
        }
    }

    /// Jar contents after `writes` are applied in order
    pub fn apply(&self, writes: &CookieWrites) -> Self {
        let mut next = self.clone();
        for write in writes.iter() {
            let (kind, value) = match write {
                CookieWrite::Set(kind, value) => (*kind, Some(value.clone())),
                CookieWrite::Clear(kind) => (*kind, None),
            };
            match kind {
                CookieKind::Session => next.session = value,
                CookieKind::Token => next.token = value,
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_absent() {
        let pair = CookiePair::new(Some(String::new()), None);
        assert!(pair.is_empty());
        assert_eq!(pair.state(), CookiePairState::Absent);
    }

    #[test]
    fn test_either_cookie_authenticates() {
        assert!(CookiePair::new(Some("s".into()), None).is_authenticated());
        assert!(CookiePair::new(None, Some("t".into())).is_authenticated());
        assert!(!CookiePair::default().is_authenticated());
    }

    #[test]
    fn test_state() {
        assert_eq!(
            CookiePair::new(Some("s".into()), None).state(),
            CookiePairState::SessionOnly
        );
        assert_eq!(
            CookiePair::new(None, Some("t".into())).state(),
            CookiePairState::TokenOnly
        );
        assert_eq!(
            CookiePair::new(Some("s".into()), Some("t".into())).state(),
            CookiePairState::Present
        );
    }

    #[test]
    fn test_apply_in_order() {
        let mut writes = CookieWrites::new();
        writes.set(CookieKind::Session, "s1");
        writes.set(CookieKind::Token, "t1");
        writes.clear(CookieKind::Token);
        writes.set(CookieKind::Token, "t2");

        let pair = CookiePair::default().apply(&writes);
        assert_eq!(pair.get(CookieKind::Session), Some("s1"));
        assert_eq!(pair.get(CookieKind::Token), Some("t2"));
    }

    #[test]
    fn test_clear_all() {
        let pair = CookiePair::new(Some("s".into()), Some("t".into()));
        let writes = CookieWrites::clear_all();

        assert!(writes.clears(CookieKind::Session));
        assert!(writes.clears(CookieKind::Token));
        assert!(pair.apply(&writes).is_empty());
    }
}
