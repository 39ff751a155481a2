use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::HandId;

/// Монотонный счётчик id раздач.
#[derive(Debug)]
pub struct IdGenerator {
    hand_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор, первый id = 1.
    pub fn new() -> Self {
        Self {
            hand_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_hand_id(&self) -> HandId {
        self.hand_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Внешний идентификатор пользователя (логин). Ключ банкролла.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId(pub String);

impl ExternalId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
