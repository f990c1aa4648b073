//! App-level composition: one store over all four slices.
//!
//! Each slice keeps its own state, action and environment types; this
//! module lifts them into [`AppState`] / [`AppAction`] / [`AppEnvironment`]
//! and combines the scoped reducers into a single [`AppReducer`].

use std::sync::Arc;
use std::time::Duration;

use shopfront_core::SmallVec;
use shopfront_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use shopfront_core::effect::Effect;
use shopfront_core::environment::{Clock, KeyValueStore, SystemClock};
use shopfront_core::reducer::Reducer;
use shopfront_runtime::{Store, StoreError};

use crate::auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState};
use crate::cart::{CartAction, CartEnvironment, CartReducer, CartState};
use crate::orders::{OrderAction, OrderEnvironment, OrderReducer, OrderState};
use crate::theme::{ThemeAction, ThemeEnvironment, ThemeReducer, ThemeState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub cart: CartState,
    pub auth: AuthState,
    pub orders: OrderState,
    pub theme: ThemeState,
}

#[derive(Debug, Clone)]
pub enum AppAction {
    Cart(CartAction),
    Auth(AuthAction),
    Orders(OrderAction),
    Theme(ThemeAction),
}

#[derive(Clone)]
pub struct AppEnvironment {
    pub cart: CartEnvironment,
    pub auth: AuthEnvironment,
    pub orders: OrderEnvironment,
    pub theme: ThemeEnvironment,
}

impl AppEnvironment {
    /// Builds the slice environments around shared collaborators.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cart: CartEnvironment,
            auth: AuthEnvironment::new(Arc::clone(&storage)),
            orders: OrderEnvironment::new(Arc::clone(&storage), clock),
            theme: ThemeEnvironment::new(storage),
        }
    }

    /// Convenience constructor using the system clock.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(storage, Arc::new(SystemClock))
    }
}

/// The four slice reducers, scoped and combined.
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, AppEnvironment>,
}

impl AppReducer {
    #[must_use]
    pub fn new() -> Self {
        let inner = combine_reducers(vec![
            Box::new(scope_reducer(
                CartReducer::new(),
                |app: &mut AppState| &mut app.cart,
                |action| match action {
                    AppAction::Cart(action) => Some(action),
                    _ => None,
                },
                AppAction::Cart,
                |env: &AppEnvironment| &env.cart,
            )),
            Box::new(scope_reducer(
                AuthReducer::new(),
                |app: &mut AppState| &mut app.auth,
                |action| match action {
                    AppAction::Auth(action) => Some(action),
                    _ => None,
                },
                AppAction::Auth,
                |env: &AppEnvironment| &env.auth,
            )),
            Box::new(scope_reducer(
                OrderReducer::new(),
                |app: &mut AppState| &mut app.orders,
                |action| match action {
                    AppAction::Orders(action) => Some(action),
                    _ => None,
                },
                AppAction::Orders,
                |env: &AppEnvironment| &env.orders,
            )),
            Box::new(scope_reducer(
                ThemeReducer::new(),
                |app: &mut AppState| &mut app.theme,
                |action| match action {
                    AppAction::Theme(action) => Some(action),
                    _ => None,
                },
                AppAction::Theme,
                |env: &AppEnvironment| &env.theme,
            )),
        ]);
        Self { inner }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, environment)
    }
}

/// The storefront's state container.
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Builds a store over a fresh [`AppState`].
#[must_use]
pub fn app_store(environment: AppEnvironment) -> AppStore {
    Store::new(AppState::default(), AppReducer::new(), environment)
}

/// Restores all persisted slices and waits for the restores to land.
///
/// After this returns, `auth`, `orders` and `theme` have their `loading`
/// flags cleared and hold whatever storage contained (or defaults where
/// storage was empty or unreadable).
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
pub async fn hydrate(store: &AppStore) -> Result<(), StoreError> {
    let mut handles = vec![
        store.send(AppAction::Auth(AuthAction::CheckAuthStatus)).await?,
        store.send(AppAction::Orders(OrderAction::LoadOrders)).await?,
        store.send(AppAction::Theme(ThemeAction::LoadPreference)).await?,
    ];
    for handle in &mut handles {
        handle.wait().await;
    }
    Ok(())
}

/// Places the current cart as an order, then clears the cart.
///
/// Returns `Ok(false)` without dispatching anything when the cart is
/// empty. Waits for the order's persistence effect before clearing, so a
/// crash between the two steps loses the cart, never the order.
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
pub async fn place_cart_order(store: &AppStore) -> Result<bool, StoreError> {
    let (lines, total_price) = store
        .state(|state| (state.cart.lines().to_vec(), state.cart.total_price()))
        .await;
    if lines.is_empty() {
        return Ok(false);
    }
    let mut handle = store
        .send(AppAction::Orders(OrderAction::PlaceOrder { lines, total_price }))
        .await?;
    handle.wait().await;
    store.send(AppAction::Cart(CartAction::Clear)).await?;
    Ok(true)
}

/// Timeout used by callers waiting on a specific follow-up action.
pub const ACTION_WAIT_TIMEOUT: Duration = Duration::from_secs(5);
