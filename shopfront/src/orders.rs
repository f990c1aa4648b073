//! Order slice: placed-order history, newest first.
//!
//! `PlaceOrder` applies the new order to state before its persistence
//! effect runs. State transitions are serialized by the store, so two
//! concurrent placements each see the other's prepend and the snapshot
//! written last contains both orders.

use std::sync::Arc;

use shopfront_core::{SmallVec, smallvec};
use shopfront_core::effect::Effect;
use shopfront_core::environment::{Clock, KeyValueStore};
use shopfront_core::reducer::Reducer;

use crate::constants::ORDERS_KEY;
use crate::types::{CartLine, Order};

#[derive(Clone)]
pub struct OrderEnvironment {
    pub storage: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
}

impl OrderEnvironment {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

/// Order history, newest first. `loading` drops on the first `OrdersLoaded`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderState {
    pub history: Vec<Order>,
    pub loading: bool,
}

impl Default for OrderState {
    fn default() -> Self {
        Self { history: Vec::new(), loading: true }
    }
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Restore the persisted history.
    LoadOrders,
    /// Result of the restore. Unreadable storage yields an empty history.
    OrdersLoaded { history: Vec<Order> },
    /// Record an order for the given lines. Callers must not pass an
    /// empty line list; the checkout flow guards against it.
    PlaceOrder { lines: Vec<CartLine>, total_price: f64 },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderReducer;

impl OrderReducer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for OrderReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = OrderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrderAction::LoadOrders => {
                state.loading = true;
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    let history = match storage.get(ORDERS_KEY).await {
                        Ok(Some(raw)) => match serde_json::from_str::<Vec<Order>>(&raw) {
                            Ok(history) => history,
                            Err(error) => {
                                tracing::warn!(%error, "Stored orders are unreadable, starting empty");
                                Vec::new()
                            }
                        },
                        Ok(None) => Vec::new(),
                        Err(error) => {
                            tracing::warn!(%error, "Failed to read stored orders, starting empty");
                            Vec::new()
                        }
                    };
                    Some(OrderAction::OrdersLoaded { history })
                }))]
            }
            OrderAction::OrdersLoaded { history } => {
                state.loading = false;
                state.history = history;
                SmallVec::new()
            }
            OrderAction::PlaceOrder { lines, total_price } => {
                debug_assert!(!lines.is_empty(), "PlaceOrder requires at least one line");
                let now = environment.clock.now();
                let order = Order {
                    id: now.timestamp_millis().to_string(),
                    created_at: now,
                    lines,
                    total_price,
                };
                state.history.insert(0, order);
                let snapshot = state.history.clone();
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    match serde_json::to_string(&snapshot) {
                        Ok(raw) => {
                            if let Err(error) = storage.set(ORDERS_KEY, raw).await {
                                tracing::warn!(%error, "Failed to persist order history");
                            } else {
                                tracing::debug!(orders = snapshot.len(), "Persisted order history");
                            }
                        }
                        Err(error) => {
                            tracing::warn!(%error, "Failed to encode order history");
                        }
                    }
                    None
                }))]
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use shopfront_testing::{MemoryStore, test_clock};

    use super::*;

    fn line(product_id: u64, price: f64, quantity: u32) -> CartLine {
        CartLine {
            product_id,
            title: format!("Product {product_id}"),
            price,
            image: String::new(),
            quantity,
        }
    }

    fn environment(store: &Arc<MemoryStore>) -> OrderEnvironment {
        OrderEnvironment::new(
            Arc::clone(store) as Arc<dyn KeyValueStore>,
            Arc::new(test_clock()),
        )
    }

    async fn run_future(mut effects: SmallVec<[Effect<OrderAction>; 4]>) -> Option<OrderAction> {
        assert_eq!(effects.len(), 1);
        match effects.remove(0) {
            Effect::Future(future) => future.await,
            other => panic!("expected a future effect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn place_order_prepends_before_persisting() {
        let store = Arc::new(MemoryStore::new());
        let reducer = OrderReducer::new();
        let mut state = OrderState { history: Vec::new(), loading: false };

        let effects = reducer.reduce(
            &mut state,
            OrderAction::PlaceOrder { lines: vec![line(1, 10.0, 2)], total_price: 20.0 },
            &environment(&store),
        );

        // Applied synchronously, before the persistence effect runs.
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].total_price, 20.0);
        assert_eq!(state.history[0].id, state.history[0].created_at.timestamp_millis().to_string());

        assert!(run_future(effects).await.is_none());
        let raw = match store.peek(ORDERS_KEY) {
            Some(raw) => raw,
            None => panic!("history was not persisted"),
        };
        let persisted: Vec<Order> = match serde_json::from_str(&raw) {
            Ok(orders) => orders,
            Err(e) => panic!("persisted history unreadable: {e}"),
        };
        assert_eq!(persisted, state.history);
    }

    #[tokio::test]
    async fn second_order_lands_at_the_front() {
        let store = Arc::new(MemoryStore::new());
        let reducer = OrderReducer::new();
        let mut state = OrderState { history: Vec::new(), loading: false };
        let env = environment(&store);

        let first = reducer.reduce(
            &mut state,
            OrderAction::PlaceOrder { lines: vec![line(1, 10.0, 1)], total_price: 10.0 },
            &env,
        );
        run_future(first).await;
        let second = reducer.reduce(
            &mut state,
            OrderAction::PlaceOrder { lines: vec![line(2, 4.5, 1)], total_price: 4.5 },
            &env,
        );
        run_future(second).await;

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].total_price, 4.5);
        assert_eq!(state.history[1].total_price, 10.0);
    }

    #[tokio::test]
    async fn load_orders_round_trips_persisted_history() {
        let store = Arc::new(MemoryStore::new());
        let reducer = OrderReducer::new();
        let env = environment(&store);

        let mut first_session = OrderState { history: Vec::new(), loading: false };
        let effects = reducer.reduce(
            &mut first_session,
            OrderAction::PlaceOrder { lines: vec![line(3, 7.25, 2)], total_price: 14.5 },
            &env,
        );
        run_future(effects).await;

        let mut second_session = OrderState::default();
        let effects = reducer.reduce(&mut second_session, OrderAction::LoadOrders, &env);
        let Some(loaded) = run_future(effects).await else {
            panic!("load produced no action");
        };
        reducer.reduce(&mut second_session, loaded, &env);

        assert!(!second_session.loading);
        assert_eq!(second_session.history, first_session.history);
    }

    #[tokio::test]
    async fn unreadable_storage_degrades_to_empty_history() {
        let store = Arc::new(MemoryStore::new());
        store.seed(ORDERS_KEY, "not json");
        let reducer = OrderReducer::new();
        let mut state = OrderState::default();
        let env = environment(&store);

        let effects = reducer.reduce(&mut state, OrderAction::LoadOrders, &env);
        let Some(loaded) = run_future(effects).await else {
            panic!("load produced no action");
        };
        reducer.reduce(&mut state, loaded, &env);

        assert!(!state.loading);
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn failed_persistence_keeps_the_in_memory_order() {
        let store = Arc::new(MemoryStore::new());
        store.fail_writes(true);
        let reducer = OrderReducer::new();
        let mut state = OrderState { history: Vec::new(), loading: false };

        let effects = reducer.reduce(
            &mut state,
            OrderAction::PlaceOrder { lines: vec![line(1, 10.0, 1)], total_price: 10.0 },
            &environment(&store),
        );
        run_future(effects).await;

        assert_eq!(state.history.len(), 1);
        assert_eq!(store.peek(ORDERS_KEY), None);
    }
}
