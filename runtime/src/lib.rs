//! # Parlour Runtime
//!
//! The Store runtime that owns state, runs the reducer and executes effects.
//!
//! ## Core Components
//!
//! - **Store**: Holds state, reducer and environment; processes actions one at a time
//! - **Effect Executor**: Runs effect descriptions and feeds resulting actions back
//! - **`EffectHandle`**: Lets a caller await the effects started by one `send`
//!
//! ## Example
//!
//! ```ignore
//! use parlour_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//!
//! // The owning view is gone: late effect results are dropped from now on
//! store.unmount();
//! ```

use parlour_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Store errors
pub mod error {
    use thiserror::Error;

    /// Why a store call failed
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store was unmounted and no longer accepts actions
        #[error("Store has been unmounted")]
        Unmounted,

        /// Timed out waiting for effects to complete
        #[error("Timed out waiting for effects after {0:?}")]
        Timeout(std::time::Duration),
    }
}

pub use error::StoreError;
pub use store::Store;

/// Handle for awaiting the effects started by one `send`
///
/// Effects run on spawned tasks; `send` returns as soon as the state is
/// committed. Awaiting the handle waits until every effect started by that
/// action has finished and any action it produced has been reduced.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(MenuAction::Load).await?;
/// handle.wait().await;
/// assert!(!store.state(|s| s.loading).await);
/// ```
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new handle with the tracking context used during execution
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects from this action still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Resolve once every effect started by the send, and the sends they caused, has finished
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every sender dropped, so every guard has run
                break;
            }
        }
    }

    /// Like [`wait`](Self::wait), giving up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires first.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout(timeout))
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Runs even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Store runtime: serialised reduction plus effect execution.
pub mod store {
    use super::{
        Arc, AtomicBool, DecrementGuard, Effect, EffectHandle, EffectTracking, Ordering, Reducer,
        RwLock, StoreError,
    };
    use parlour_core::reducer::apply;
    use tokio::sync::broadcast;

    /// Owner of one state record, its reducer and its environment
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; one reduction at a time)
    /// 2. Reducer (state transitions)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Liveness (results arriving after `unmount` are discarded)
    ///
    /// Cloning a store yields another handle onto the same state, which is
    /// how a store is passed down to the code that dispatches into it.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        mounted: Arc<AtomicBool>,
        /// Actions produced by effects, for observers
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Mount a store holding `initial_state`
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(16);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                mounted: Arc::new(AtomicBool::new(true)),
                action_broadcast,
            }
        }

        /// Reduce `action`, commit the next state and start its effects
        ///
        /// Reduces a copy of the current state, commits it, then starts the
        /// returned effects. Returns once the new state is visible; effects
        /// keep running in the background.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Unmounted`] if the store has been unmounted.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if !self.is_mounted() {
                tracing::warn!("Rejected action: store is unmounted");
                metrics::counter!("store.actions.rejected").increment(1);
                return Err(StoreError::Unmounted);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                let (next, effects) = apply(&*self.reducer, &state, action, &self.environment);
                *state = next;
                effects
            };

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Project the committed state through `f` under a read lock
        ///
        /// ```ignore
        /// let count = store.state(|s| s.messages.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Subscribe to actions produced by effects
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Mark the owning scope as gone
        ///
        /// New actions are rejected and actions produced by effects still in
        /// flight are discarded instead of being reduced.
        pub fn unmount(&self) {
            if self.mounted.swap(false, Ordering::AcqRel) {
                tracing::debug!("Store unmounted");
            }
        }

        /// Whether the store still accepts actions
        #[must_use]
        pub fn is_mounted(&self) -> bool {
            self.mounted.load(Ordering::Acquire)
        }

        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    for effect in effects {
                        self.execute_effect(effect, tracking);
                    }
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    let guard = DecrementGuard(tracking.clone());
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;

                        let Some(action) = fut.await else {
                            tracing::trace!("Effect::Future completed with no action");
                            return;
                        };

                        if !store.is_mounted() {
                            tracing::debug!("Discarding late effect result: store is unmounted");
                            metrics::counter!("store.effects.discarded").increment(1);
                            return;
                        }

                        let _ = store.action_broadcast.send(action.clone());

                        match store.send(action).await {
                            Ok(mut handle) => handle.wait().await,
                            Err(error) => {
                                tracing::debug!(%error, "Feedback action dropped");
                            },
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                mounted: Arc::clone(&self.mounted),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}
