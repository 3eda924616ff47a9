//! Pure state transitions.
//!
//! A [`Reducer`] computes the next state from the prior state and an action.
//! Reducers must be total (unknown actions return the prior state unchanged)
//! and must not mutate prior state — state is threaded through as `Arc`s and a
//! reducer that has nothing to change simply returns the `Arc` it was handed.
//!
//! [`CombinedReducer`] merges independent slice reducers into one reducer over
//! a keyed [`StateTree`].

mod combine;

pub use combine::{CombinedReducer, StateTree};

use std::sync::Arc;

use crate::action::StoreAction;

/// A pure state-transition function.
///
/// `state` is `None` only before the store has initialized, i.e. when the
/// reducer sees [`StoreAction::Init`] without preloaded state; the reducer must
/// supply its own default in that case. Implemented for free by any matching
/// closure or `fn` item.
pub trait Reducer<S, A>: Send + Sync {
    /// Compute the next state. Must not observe or cause side effects.
    fn reduce(&self, state: Option<Arc<S>>, action: &StoreAction<A>) -> Arc<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<Arc<S>>, &StoreAction<A>) -> Arc<S> + Send + Sync,
{
    fn reduce(&self, state: Option<Arc<S>>, action: &StoreAction<A>) -> Arc<S> {
        self(state, action)
    }
}
