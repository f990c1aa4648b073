//! Reducer composition utilities
//!
//! This module provides the pieces for assembling an app-level reducer out
//! of independent slice reducers:
//!
//! - **`scope_reducer`**: focus a slice reducer on a subset of the app state,
//!   a subset of the app action space, and its own environment
//! - **`combine_reducers`**: run several scoped reducers for each action and
//!   concatenate their effects
//!
//! A scoped reducer ignores actions its prism does not match, so combining
//! one scoped reducer per slice routes each action to exactly the reducer
//! that owns it.

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence and all effects are collected and
/// concatenated. Together with [`scope_reducer`] this is how the app store
/// is assembled: one scoped reducer per slice, combined into a single
/// reducer over the app state.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a slice reducer into a parent reducer.
///
/// Three projections are required:
///
/// - a state lens (`get_state`) from the parent state to the slice state
/// - an action prism (`extract`/`embed`) between the parent action enum and
///   the slice action enum
/// - an environment projection (`get_env`) selecting the slice's
///   dependencies out of the parent environment
///
/// Actions the prism does not match are ignored; effects returned by the
/// slice are re-embedded into the parent action type via [`Effect::map`].
///
/// # Examples
///
/// ```ignore
/// let scoped = scope_reducer(
///     CartReducer::new(),
///     |app: &mut AppState| &mut app.cart,
///     |action| match action {
///         AppAction::Cart(a) => Some(a),
///         _ => None,
///     },
///     AppAction::Cart,
///     |env: &AppEnvironment| &env.cart,
/// );
/// ```
pub fn scope_reducer<S, A, E, R>(
    reducer: R,
    get_state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
    get_env: fn(&E) -> &R::Environment,
) -> ScopedReducer<S, A, E, R>
where
    S: 'static,
    A: Send + 'static,
    E: 'static,
    R: Reducer,
    R::Action: Send + 'static,
{
    ScopedReducer {
        reducer,
        get_state,
        extract,
        embed,
        get_env,
    }
}

/// A slice reducer lifted into a parent state/action/environment.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    reducer: R,
    get_state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
    get_env: fn(&E) -> &R::Environment,
}

impl<S, A, E, R> Reducer for ScopedReducer<S, A, E, R>
where
    S: 'static,
    A: Send + 'static,
    E: 'static,
    R: Reducer,
    R::Action: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Not this slice's action
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.get_state)(state);
        let effects = self
            .reducer
            .reduce(child_state, child_action, (self.get_env)(env));

        effects.into_iter().map(|e| e.map(self.embed)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)] // Test code can panic
mod tests {
    use super::*;
    use crate::{SmallVec, smallvec};

    #[derive(Clone, Default)]
    struct CounterState {
        value: i32,
    }

    #[derive(Clone)]
    enum CounterAction {
        Add(i32),
    }

    #[derive(Clone, Default)]
    struct NameState {
        name: String,
    }

    #[derive(Clone)]
    enum NameAction {
        Set(String),
    }

    #[derive(Clone, Default)]
    struct ParentState {
        counter: CounterState,
        label: NameState,
    }

    #[derive(Clone)]
    enum ParentAction {
        Counter(CounterAction),
        Label(NameAction),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            let CounterAction::Add(n) = action;
            state.value += n;
            smallvec![Effect::None]
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = NameState;
        type Action = NameAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            let NameAction::Set(name) = action;
            state.name = name;
            smallvec![Effect::None]
        }
    }

    fn parent_reducer()
    -> CombinedReducer<ParentState, ParentAction, ()> {
        combine_reducers(vec![
            Box::new(scope_reducer(
                CounterReducer,
                |s: &mut ParentState| &mut s.counter,
                |a| match a {
                    ParentAction::Counter(a) => Some(a),
                    ParentAction::Label(_) => None,
                },
                ParentAction::Counter,
                |e: &()| e,
            )),
            Box::new(scope_reducer(
                NameReducer,
                |s: &mut ParentState| &mut s.label,
                |a| match a {
                    ParentAction::Label(a) => Some(a),
                    ParentAction::Counter(_) => None,
                },
                ParentAction::Label,
                |e: &()| e,
            )),
        ])
    }

    #[test]
    fn routes_actions_to_owning_slice() {
        let reducer = parent_reducer();
        let mut state = ParentState::default();

        let _ = reducer.reduce(&mut state, ParentAction::Counter(CounterAction::Add(3)), &());
        assert_eq!(state.counter.value, 3);
        assert_eq!(state.label.name, "");

        let _ = reducer.reduce(
            &mut state,
            ParentAction::Label(NameAction::Set("cart".to_string())),
            &(),
        );
        assert_eq!(state.counter.value, 3);
        assert_eq!(state.label.name, "cart");
    }

    #[test]
    fn unmatched_actions_produce_no_effects() {
        let scoped = scope_reducer(
            CounterReducer,
            |s: &mut ParentState| &mut s.counter,
            |a| match a {
                ParentAction::Counter(a) => Some(a),
                ParentAction::Label(_) => None,
            },
            ParentAction::Counter,
            |e: &()| e,
        );

        let mut state = ParentState::default();
        let effects = scoped.reduce(
            &mut state,
            ParentAction::Label(NameAction::Set("x".to_string())),
            &(),
        );
        assert!(effects.is_empty());
        assert_eq!(state.counter.value, 0);
    }
}
