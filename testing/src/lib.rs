//! # Shopfront Testing
//!
//! Testing utilities and helpers for the Shopfront reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (`FixedClock`, `MemoryStore`)
//! - The [`ReducerTest`] Given-When-Then builder
//! - Assertion helpers for reducer effects
//!
//! ## Example
//!
//! ```ignore
//! use shopfront_testing::{MemoryStore, test_clock};
//!
//! #[tokio::test]
//! async fn test_login_flow() {
//!     let storage = MemoryStore::new();
//!     let env = auth_environment(storage.clone());
//!     let store = Store::new(AuthState::default(), AuthReducer::new(), env);
//!
//!     let mut handle = store.send(AuthAction::Login { .. }).await?;
//!     handle.wait().await;
//!
//!     assert!(store.state(|s| s.is_authenticated).await);
//! }
//! ```

use chrono::{DateTime, Utc};
use shopfront_core::environment::Clock;

/// Ergonomic Given-When-Then testing for reducers
pub mod reducer_test;

/// Mock implementations of Environment traits
///
/// Mock implementations for testing: a deterministic clock and an
/// in-memory key-value store with failure injection.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use shopfront_core::environment::{KeyValueStore, StorageError};
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use shopfront_testing::mocks::FixedClock;
    /// use shopfront_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// In-memory key-value store for tests
    ///
    /// Implements [`KeyValueStore`] over a shared `HashMap`. Clones share
    /// the underlying map, so a store handed to an environment can still be
    /// inspected (or failed) from the test body.
    ///
    /// Failure injection exercises the best-effort persistence policy:
    /// with `fail_reads` set every `get` returns `StorageError::Read`, with
    /// `fail_writes` set every `set`/`remove` returns `StorageError::Write`.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStore {
        data: Arc<Mutex<HashMap<String, String>>>,
        fail_reads: Arc<AtomicBool>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MemoryStore {
        /// Create a new empty store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Toggle read failure injection
        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Toggle write failure injection
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Read a value synchronously, bypassing failure injection
        ///
        /// For asserting on persisted contents from a test body.
        #[must_use]
        pub fn peek(&self, key: &str) -> Option<String> {
            self.lock().get(key).cloned()
        }

        /// Seed a value synchronously, bypassing failure injection
        pub fn seed(&self, key: &str, value: impl Into<String>) {
            self.lock().insert(key.to_string(), value.into());
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
            self.data
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get<'a>(
            &'a self,
            key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + 'a>>
        {
            let result = if self.fail_reads.load(Ordering::SeqCst) {
                Err(StorageError::Read("injected read failure".to_string()))
            } else {
                Ok(self.lock().get(key).cloned())
            };
            Box::pin(async move { result })
        }

        fn set<'a>(
            &'a self,
            key: &'a str,
            value: String,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
            let result = if self.fail_writes.load(Ordering::SeqCst) {
                Err(StorageError::Write("injected write failure".to_string()))
            } else {
                self.lock().insert(key.to_string(), value);
                Ok(())
            };
            Box::pin(async move { result })
        }

        fn remove<'a>(
            &'a self,
            key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
            let result = if self.fail_writes.load(Ordering::SeqCst) {
                Err(StorageError::Write("injected write failure".to_string()))
            } else {
                self.lock().remove(key);
                Ok(())
            };
            Box::pin(async move { result })
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, MemoryStore, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::environment::{Clock, KeyValueStore};

    #[test]
    fn fixed_clock_is_deterministic() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").await.ok(), Some(None));

        store
            .set("theme", "dark".to_string())
            .await
            .ok();
        assert_eq!(store.peek("theme").as_deref(), Some("dark"));

        store.remove("theme").await.ok();
        assert_eq!(store.peek("theme"), None);
    }

    #[tokio::test]
    async fn failure_injection_reports_errors() {
        let store = MemoryStore::new();
        store.seed("user", "{}");

        store.fail_reads(true);
        assert!(store.get("user").await.is_err());

        store.fail_writes(true);
        assert!(store.set("user", "{}".to_string()).await.is_err());
        assert!(store.remove("user").await.is_err());

        // Data untouched by failed writes
        assert_eq!(store.peek("user").as_deref(), Some("{}"));
    }
}
