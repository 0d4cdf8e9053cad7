//! # Parlour Testing
//!
//! Testing utilities for reducer-driven state containers.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`run_effects`]: drive effects to completion without a store
//! - [`mocks::InMemoryMenuApi`]: an in-memory menu backend with failure injection
//! - [`init_tracing`]: test log output, filtered by `RUST_LOG`
//!
//! ## Example
//!
//! ```ignore
//! use parlour_testing::mocks::InMemoryMenuApi;
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_save_flow() {
//!     let api = Arc::new(InMemoryMenuApi::with_stock(["Vanilla", "Mint"]));
//!     let store = Store::new(EditorState::update(1), EditorReducer, ParlourEnvironment::from_arc(api));
//!     // ...
//! }
//! ```

pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions, run_effects};

/// Mock implementations of environment dependencies
pub mod mocks {
    use async_trait::async_trait;
    use parlour_client::{ClientError, IceCream, MenuApi, MenuItem, NewMenuItem, sort_by_name, sort_menu};
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Debug, Default)]
    struct Backend {
        menu: BTreeMap<u64, MenuItem>,
        stock: BTreeMap<u64, IceCream>,
        next_id: u64,
        failures: VecDeque<ClientError>,
        calls: Vec<String>,
    }

    /// In-memory stand-in for the menu backend
    ///
    /// Behaves like the REST resource: ids are assigned on create, unknown
    /// ids are `NotFound`, and lists come back sorted by name. Queued
    /// failures are returned by the next calls, in order, before any state
    /// changes.
    ///
    /// # Example
    ///
    /// ```
    /// use parlour_client::{ClientError, MenuApi};
    /// use parlour_testing::mocks::InMemoryMenuApi;
    ///
    /// # tokio_test::block_on(async {
    /// let api = InMemoryMenuApi::with_stock(["Vanilla"]);
    /// api.fail_next(ClientError::Transport("offline".into()));
    ///
    /// assert!(api.list_stock().await.is_err());
    /// assert_eq!(api.list_stock().await.unwrap().len(), 1);
    /// # });
    /// ```
    #[derive(Debug, Default)]
    pub struct InMemoryMenuApi {
        backend: Mutex<Backend>,
    }

    impl InMemoryMenuApi {
        /// Empty backend
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Backend whose stock catalogue holds the given names, ids from 1
        #[must_use]
        pub fn with_stock<I, N>(names: I) -> Self
        where
            I: IntoIterator<Item = N>,
            N: Into<String>,
        {
            let api = Self::new();
            {
                let mut backend = api.lock();
                for (index, name) in names.into_iter().enumerate() {
                    let id = index as u64 + 1;
                    backend.stock.insert(id, IceCream { id, name: name.into() });
                }
            }
            api
        }

        /// Insert a menu item as-is, keeping its id
        pub fn insert(&self, item: MenuItem) {
            let mut backend = self.lock();
            backend.next_id = backend.next_id.max(item.id);
            backend.menu.insert(item.id, item);
        }

        /// Make the next call fail with `error`
        pub fn fail_next(&self, error: ClientError) {
            self.lock().failures.push_back(error);
        }

        /// Snapshot of a stored menu item
        #[must_use]
        pub fn menu_item(&self, id: u64) -> Option<MenuItem> {
            self.lock().menu.get(&id).cloned()
        }

        /// Operations received so far, e.g. `"PUT /api/menu/3"`
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.lock().calls.clone()
        }

        fn lock(&self) -> MutexGuard<'_, Backend> {
            self.backend.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Record the call and pop an injected failure, if any
        fn begin(&self, call: String) -> Result<MutexGuard<'_, Backend>, ClientError> {
            let mut backend = self.lock();
            backend.calls.push(call);
            match backend.failures.pop_front() {
                Some(error) => Err(error),
                None => Ok(backend),
            }
        }
    }

    fn not_found(path: String) -> ClientError {
        ClientError::NotFound { path }
    }

    #[async_trait]
    impl MenuApi for InMemoryMenuApi {
        async fn list_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
            let backend = self.begin("GET /api/menu".to_string())?;
            let mut items: Vec<MenuItem> = backend.menu.values().cloned().collect();
            sort_menu(&mut items);
            Ok(items)
        }

        async fn get_menu_item(&self, id: u64) -> Result<MenuItem, ClientError> {
            let path = format!("/api/menu/{id}");
            let backend = self.begin(format!("GET {path}"))?;
            backend.menu.get(&id).cloned().ok_or_else(|| not_found(path))
        }

        async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, ClientError> {
            let mut backend = self.begin("POST /api/menu".to_string())?;
            backend.next_id += 1;
            let created = item.with_id(backend.next_id);
            backend.menu.insert(created.id, created.clone());
            Ok(created)
        }

        async fn update_menu_item(&self, item: MenuItem) -> Result<MenuItem, ClientError> {
            let path = format!("/api/menu/{}", item.id);
            let mut backend = self.begin(format!("PUT {path}"))?;
            match backend.menu.get_mut(&item.id) {
                Some(stored) => {
                    *stored = item.clone();
                    Ok(item)
                },
                None => Err(not_found(path)),
            }
        }

        async fn delete_menu_item(&self, id: u64) -> Result<(), ClientError> {
            let path = format!("/api/menu/{id}");
            let mut backend = self.begin(format!("DELETE {path}"))?;
            backend
                .menu
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| not_found(path))
        }

        async fn list_stock(&self) -> Result<Vec<IceCream>, ClientError> {
            let backend = self.begin("GET /api/menu/stock-ice-creams".to_string())?;
            let mut ice_creams: Vec<IceCream> = backend.stock.values().cloned().collect();
            sort_by_name(&mut ice_creams);
            Ok(ice_creams)
        }

        async fn get_stock(&self, id: u64) -> Result<IceCream, ClientError> {
            let path = format!("/api/menu/stock-ice-creams/{id}");
            let backend = self.begin(format!("GET {path}"))?;
            backend.stock.get(&id).cloned().ok_or_else(|| not_found(path))
        }
    }
}

/// Install a test subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}
