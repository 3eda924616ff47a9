//! # Ratchet
//!
//! A unidirectional state container for Rust.
//!
//! One state cell, updated only through pure transition functions and observed
//! via subscription:
//!
//! - [`Store`] — owns the current state, applies actions through a reducer,
//!   notifies listeners after every replacement.
//! - [`Reducer`] / [`CombinedReducer`] — pure transitions, composable across
//!   independent state slices keyed in a [`StateTree`].
//! - [`Middleware`] / [`apply_middleware`] — a composable interception layer
//!   around dispatch, applied through the store [`Enhancer`] seam.
//! - [`compose`](compose::compose) — the right-to-left function composition
//!   the pipeline is built with.
//!
//! Dispatch is synchronous and single-attempt throughout: reducer failures
//! propagate to the dispatch caller with the prior state intact, and listener
//! failures abort the remaining notifications for that cycle.
//!
//! ```
//! use std::sync::Arc;
//! use ratchet::{Store, StoreAction};
//!
//! #[derive(Debug)]
//! enum Action {
//!     Add(i32),
//! }
//!
//! fn total(state: Option<Arc<i32>>, action: &StoreAction<Action>) -> Arc<i32> {
//!     let state = state.unwrap_or_else(|| Arc::new(0));
//!     match action {
//!         StoreAction::Action(Action::Add(n)) => Arc::new(*state + n),
//!         _ => state,
//!     }
//! }
//!
//! let store = Store::new(total);
//! let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
//!
//! let observer = store.clone();
//! let log = seen.clone();
//! let subscription = store.subscribe(move || log.lock().unwrap().push(*observer.state()));
//!
//! store.dispatch(Action::Add(2));
//! store.dispatch(Action::Add(40));
//! subscription.unsubscribe();
//!
//! assert_eq!(*store.state(), 42);
//! assert_eq!(*seen.lock().unwrap(), [2, 42]);
//! ```

pub mod action;
pub mod compose;
pub mod error;
pub mod middleware;
pub mod reducer;
pub mod store;

// Re-export main types for convenience
pub use action::StoreAction;
pub use error::StoreError;
pub use middleware::{
    apply_middleware, ApplyMiddleware, DispatchFn, DispatchWrapper, LoggingMiddleware, Middleware,
    MiddlewareApi,
};
pub use reducer::{CombinedReducer, Reducer, StateTree};
pub use store::{Enhancer, Store, StoreBuilder, StoreCreator, Subscription};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    enum Action {
        Increment,
    }

    fn counter(state: Option<Arc<i32>>, action: &StoreAction<Action>) -> Arc<i32> {
        let state = state.unwrap_or_else(|| Arc::new(0));
        match action {
            StoreAction::Action(Action::Increment) => Arc::new(*state + 1),
            _ => state,
        }
    }

    #[test]
    fn it_works() {
        // Basic smoke test
        let store = Store::new(counter);
        store.dispatch(Action::Increment);
        assert_eq!(*store.state(), 1);
    }
}
