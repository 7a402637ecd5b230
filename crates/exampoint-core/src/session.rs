//! Session state: current user, authentication flag, tier and signup log.
//!
//! One `Session` lives for the lifetime of a browser session (or gateway
//! process). It is owned by the caller and passed by reference; nothing here
//! is global. Login and signup simulate a backend round-trip with a fixed
//! delay before mutating state.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use crate::error::SessionError;
use crate::tier::{self, Tier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    /// Up to two upper-case initials from the display name ("ada lovelace" -> "AL").
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// A new registration, kept for the admin tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupEvent {
    pub id: String,
    pub user: User,
    pub timestamp: DateTime<Utc>,
    pub tier: Tier,
}

/// Admin tracker figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignupStats {
    pub total: usize,
    pub last_hour: usize,
    pub growth: usize,
}

#[derive(Debug)]
pub struct Session {
    user: Option<User>,
    authenticated: bool,
    tier: Tier,
    /// Newest first.
    signup_events: VecDeque<SignupEvent>,
    auth_delay: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::config::MockLatency::default().auth())
    }
}

impl Session {
    /// Anonymous session whose login/signup wait `auth_delay` before completing.
    pub fn new(auth_delay: Duration) -> Self {
        Self {
            user: None,
            authenticated: false,
            tier: Tier::Free,
            signup_events: VecDeque::new(),
            auth_delay,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn current_tier(&self) -> Tier {
        self.tier
    }

    pub fn signup_events(&self) -> impl Iterator<Item = &SignupEvent> {
        self.signup_events.iter()
    }

    pub fn signup_count(&self) -> usize {
        self.signup_events.len()
    }

    /// Log in an existing account. The stored tier is not looked up; it is FREE.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, SessionError> {
        let email = require("email", email)?;
        require("password", password)?;

        tokio::time::sleep(self.auth_delay).await;

        let name = email.split('@').next().unwrap_or_default().to_string();
        self.authenticated = true;
        self.tier = Tier::Free;
        tracing::info!(email, "session: login");
        Ok(self.user.insert(User {
            id: "1".to_string(),
            email: email.to_string(),
            name,
        }))
    }

    /// Register a new account. New accounts always start on FREE.
    pub async fn signup(&mut self, email: &str, password: &str, name: &str) -> Result<&User, SessionError> {
        let email = require("email", email)?;
        require("password", password)?;
        let name = require("name", name)?;

        tokio::time::sleep(self.auth_delay).await;

        let user = User {
            id: short_id(),
            email: email.to_string(),
            name: name.to_string(),
        };
        self.signup_events.push_front(SignupEvent {
            id: short_id(),
            user: user.clone(),
            timestamp: Utc::now(),
            tier: Tier::Free,
        });
        self.authenticated = true;
        self.tier = Tier::Free;
        tracing::info!(email, total = self.signup_events.len(), "session: signup recorded");
        Ok(self.user.insert(user))
    }

    /// Back to anonymous on FREE. The signup log survives.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "session: logout");
        }
        self.authenticated = false;
        self.tier = Tier::Free;
    }

    /// Overwrite the tier. Payment happens on the external billing page and is not verified here.
    pub fn upgrade_tier(&mut self, tier: Tier) {
        tracing::info!(from = %self.tier, to = %tier, "session: tier changed");
        self.tier = tier;
    }

    pub fn has_access(&self, required: Tier) -> bool {
        tier::has_access(self.tier, required)
    }

    pub fn signup_stats(&self, now: DateTime<Utc>) -> SignupStats {
        let hour = ChronoDuration::hours(1);
        let last_hour = self
            .signup_events
            .iter()
            .filter(|e| now.signed_duration_since(e.timestamp) < hour)
            .count();
        SignupStats {
            total: self.signup_events.len(),
            last_hour,
            growth: self.signup_events.len(),
        }
    }
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, SessionError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(SessionError::MissingField(field));
    }
    Ok(v)
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..7].to_string()
}
