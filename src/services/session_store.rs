// src/services/session_store.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::message::UserProfile;

#[derive(Clone, Debug)]
struct SessionEntry {
    user: UserProfile,
    last_seen: Instant,
}

/// In-memory map from opaque session tokens to the signed-in identity.
/// Tokens expire after `ttl` of inactivity; validation touches the entry.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("ttl", &self.ttl).finish()
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Issue a fresh token for a verified identity.
    pub async fn issue(&self, user: UserProfile) -> String {
        let token = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            user,
            last_seen: Instant::now(),
        };

        let mut guard = self.inner.write().await;
        guard.insert(token.clone(), entry);
        token
    }

    /// Look up a token. A live entry is touched and its identity returned;
    /// an expired entry is dropped on the spot.
    pub async fn validate(&self, token: &str) -> Option<UserProfile> {
        let mut guard = self.inner.write().await;
        match guard.get_mut(token) {
            Some(entry) if entry.last_seen.elapsed() < self.ttl => {
                entry.last_seen = Instant::now();
                Some(entry.user.clone())
            }
            Some(_) => {
                guard.remove(token);
                None
            }
            None => None,
        }
    }

    /// Remove a token. Returns whether it existed.
    pub async fn revoke(&self, token: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(token).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let before = guard.len();
        guard.retain(|_, entry| entry.last_seen.elapsed() < self.ttl);
        before - guard.len()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}
