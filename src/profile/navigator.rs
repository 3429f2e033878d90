//! Navigation side effects requested by the profile view.

use std::sync::{Mutex, PoisonError};

/// Something that can move the user to another route.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Records the last requested destination so the caller can act on it,
/// e.g. by answering with a redirect.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    target: Mutex<Option<String>>,
}

impl PendingNavigation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn target(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for PendingNavigation {
    fn push(&self, path: &str) {
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_push_wins_and_take_clears() {
        let navigation = PendingNavigation::new();
        assert!(navigation.target().is_none());

        navigation.push("/dashboard");
        navigation.push("/login");
        assert_eq!(navigation.target().as_deref(), Some("/login"));

        assert_eq!(navigation.take().as_deref(), Some("/login"));
        assert!(navigation.target().is_none());
    }
}
