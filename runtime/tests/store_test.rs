//! Integration tests for the Store runtime
//!
//! Covers state commits, the effect feedback loop, action observation and
//! the unmount liveness guard.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use parlour_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum ScoopAction {
    /// Add scoops directly
    Add(u32),
    /// Ask the environment for a delivery, then apply it
    RequestDelivery,
    /// Two deliveries at once
    RequestTwoDeliveries,
    /// Delivery arrived
    Delivered(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ScoopState {
    scoops: u32,
    pending: u32,
    deliveries: Vec<u32>,
}

/// Controls when deliveries arrive
#[derive(Default)]
struct Warehouse {
    release: Notify,
    gated: bool,
}

#[derive(Clone)]
struct ScoopReducer;

fn delivery(env: &Arc<Warehouse>, size: u32) -> Effect<ScoopAction> {
    let env = Arc::clone(env);
    Effect::future(async move {
        if env.gated {
            env.release.notified().await;
        }
        Some(ScoopAction::Delivered(size))
    })
}

impl Reducer for ScoopReducer {
    type State = ScoopState;
    type Action = ScoopAction;
    type Environment = Arc<Warehouse>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ScoopAction::Add(n) => {
                state.scoops += n;
                smallvec![Effect::None]
            },
            ScoopAction::RequestDelivery => {
                state.pending += 1;
                smallvec![delivery(env, 10)]
            },
            ScoopAction::RequestTwoDeliveries => {
                state.pending += 2;
                smallvec![Effect::merge(vec![delivery(env, 1), delivery(env, 2)])]
            },
            ScoopAction::Delivered(n) => {
                state.pending = state.pending.saturating_sub(1);
                state.scoops += n;
                state.deliveries.push(n);
                smallvec![Effect::None]
            },
        }
    }
}

fn store(gated: bool) -> (Store<ScoopState, ScoopAction, Arc<Warehouse>, ScoopReducer>, Arc<Warehouse>) {
    let warehouse = Arc::new(Warehouse {
        release: Notify::new(),
        gated,
    });
    let store = Store::new(ScoopState::default(), ScoopReducer, Arc::clone(&warehouse));
    (store, warehouse)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_commits_state() {
    let (store, _) = store(false);

    let mut handle = store.send(ScoopAction::Add(3)).await.unwrap();
    handle.wait().await;

    assert_eq!(store.state(|s| s.scoops).await, 3);
    assert_eq!(handle.pending(), 0);
}

#[tokio::test]
async fn test_future_effect_feeds_action_back() {
    let (store, _) = store(false);

    let mut handle = store.send(ScoopAction::RequestDelivery).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.scoops, 10);
    assert_eq!(state.pending, 0);
    assert_eq!(state.deliveries, vec![10]);
}

#[tokio::test]
async fn test_parallel_effects_all_complete() {
    let (store, _) = store(false);

    let mut handle = store.send(ScoopAction::RequestTwoDeliveries).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    let mut deliveries = store.state(|s| s.deliveries.clone()).await;
    deliveries.sort_unstable();
    assert_eq!(deliveries, vec![1, 2]);
    assert_eq!(store.state(|s| s.scoops).await, 3);
}

#[tokio::test]
async fn test_subscribers_observe_feedback_actions() {
    let (store, _) = store(false);
    let mut actions = store.subscribe_actions();

    let _ = store.send(ScoopAction::RequestDelivery).await.unwrap();

    let observed = tokio::time::timeout(Duration::from_secs(5), actions.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(observed, ScoopAction::Delivered(10));
}

#[tokio::test]
async fn test_unmounted_store_rejects_actions() {
    let (store, _) = store(false);

    store.unmount();

    assert!(!store.is_mounted());
    let result = store.send(ScoopAction::Add(1)).await;
    assert_eq!(result.unwrap_err(), StoreError::Unmounted);
    assert_eq!(store.state(|s| s.scoops).await, 0);
}

#[tokio::test]
async fn test_late_results_after_unmount_are_discarded() {
    let (store, warehouse) = store(true);

    let mut handle = store.send(ScoopAction::RequestDelivery).await.unwrap();
    assert_eq!(handle.pending(), 1);

    // The view goes away while the delivery is still outstanding
    store.unmount();
    warehouse.release.notify_one();

    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.pending, 1);
    assert_eq!(state.scoops, 0);
    assert!(state.deliveries.is_empty());
}

#[tokio::test]
async fn test_wait_times_out_while_effect_is_gated() {
    let (store, warehouse) = store(true);

    let mut handle = store.send(ScoopAction::RequestDelivery).await.unwrap();
    let result = handle.wait_with_timeout(Duration::from_millis(20)).await;
    assert_eq!(result, Err(StoreError::Timeout(Duration::from_millis(20))));

    warehouse.release.notify_one();
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.scoops).await, 10);
}

#[tokio::test]
async fn test_clones_share_state() {
    let (store, _) = store(false);
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                let _ = store.send(ScoopAction::Add(1)).await;
            })
        })
        .collect();

    for handle in handles {
        tokio_test::assert_ok!(handle.await);
    }

    assert_eq!(store.state(|s| s.scoops).await, 10);
}

#[tokio::test]
async fn test_completed_handle_does_not_block() {
    let mut handle = parlour_runtime::EffectHandle::completed();
    handle
        .wait_with_timeout(Duration::from_millis(50))
        .await
        .unwrap();
    assert_eq!(handle.pending(), 0);
}
