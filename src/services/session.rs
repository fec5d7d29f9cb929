//! Session values handed over by the browser login collaborator.
//!
//! The collaborator (cookie store + provider redirect) is external; it inserts
//! a [`Session`] into the request extensions. A logged-in session carries the
//! provider's user profile under [`PROFILE_KEY`].
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PROFILE_KEY: &str = "profile";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    values: Map<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Value) -> Self {
        let mut session = Self::new();
        session.insert(PROFILE_KEY, profile);
        session
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn profile(&self) -> Option<&Value> {
        self.get(PROFILE_KEY)
    }

    /// Logged in means the key is present, whatever its value.
    pub fn has_profile(&self) -> bool {
        self.values.contains_key(PROFILE_KEY)
    }
}
