//! Bearer-token sessions and the auth filters.
//!
//! Login and signup live outside this service; the API only needs to
//! resolve a bearer token to a user. Sessions are issued in-process
//! (demo seeding, tests) and held in memory.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use smartcart_commerce::UserId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use warp::{Filter, Rejection};

/// Access role attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

/// An authenticated user, as resolved from a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// In-memory session store mapping opaque tokens to users.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, User>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new opaque token for a user.
    pub fn issue(&self, user: User) -> Result<String, ApiError> {
        let token = generate_token();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))?;
        sessions.insert(token.clone(), user);
        Ok(token)
    }

    /// Resolve a token to its user, if the session exists.
    pub fn authenticate(&self, token: &str) -> Option<User> {
        self.sessions.read().ok()?.get(token).cloned()
    }

    /// Drop a session.
    pub fn revoke(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }
}

fn generate_token() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("sct_{:x}{:08x}", timestamp as u64 ^ counter.rotate_left(17), counter)
}

/// Filter extracting the authenticated user from the Authorization
/// header. Rejects with 401 when the token is missing or unknown.
pub fn authenticated(
    sessions: Arc<SessionStore>,
) -> impl Filter<Extract = (User,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let sessions = sessions.clone();
        async move {
            let token = header
                .as_deref()
                .and_then(|h| h.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    ApiError::Unauthorized("Not authorized, no token".to_string()).reject()
                })?;
            sessions.authenticate(token).ok_or_else(|| {
                ApiError::Unauthorized("Not authorized, token failed".to_string()).reject()
            })
        }
    })
}

/// Filter requiring an admin session on top of [`authenticated`].
pub fn admin(
    sessions: Arc<SessionStore>,
) -> impl Filter<Extract = (User,), Error = Rejection> + Clone {
    authenticated(sessions).and_then(|user: User| async move {
        if user.is_admin() {
            Ok(user)
        } else {
            Err(ApiError::Forbidden("Not authorized as admin".to_string()).reject())
        }
    })
}
