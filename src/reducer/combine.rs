use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::action::StoreAction;
use crate::error::StoreError;
use crate::reducer::Reducer;

type SliceValue = Arc<dyn Any + Send + Sync>;

/// A keyed state tree produced by a [`CombinedReducer`].
///
/// Each slice is stored type-erased behind an `Arc`; slices that a dispatch
/// leaves untouched keep their allocation, so consumers can detect "nothing
/// changed here" with [`Arc::ptr_eq`] on the typed handles.
#[derive(Clone, Default)]
pub struct StateTree {
    slices: BTreeMap<&'static str, SliceValue>,
}

impl StateTree {
    /// The slice under `key`, or `None` if the key is absent or holds a
    /// different type.
    pub fn get<S: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<S>> {
        self.slices.get(key).and_then(|v| v.clone().downcast().ok())
    }

    /// Like [`get`](Self::get), but distinguishes a missing key from a type
    /// mismatch.
    pub fn require<S: Send + Sync + 'static>(&self, key: &str) -> Result<Arc<S>, StoreError> {
        let slice = self
            .slices
            .get(key)
            .ok_or_else(|| StoreError::MissingSlice(key.to_string()))?;
        slice
            .clone()
            .downcast()
            .map_err(|_| StoreError::SliceTypeMismatch(key.to_string()))
    }

    /// Number of slices in the tree.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the tree has no slices.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Registered slice keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slices.keys().copied()
    }
}

impl std::fmt::Debug for StateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.slices.keys()).finish()
    }
}

/// Object-safe view of one registered slice, with the state type erased.
trait SliceReducer<A>: Send + Sync {
    fn reduce_slice(&self, prior: Option<SliceValue>, action: &StoreAction<A>) -> SliceValue;
}

struct Slice<S, F> {
    reduce: F,
    _state: PhantomData<fn() -> S>,
}

impl<S, A, F> SliceReducer<A> for Slice<S, F>
where
    S: Send + Sync + 'static,
    F: Fn(Option<Arc<S>>, &StoreAction<A>) -> Arc<S> + Send + Sync,
{
    fn reduce_slice(&self, prior: Option<SliceValue>, action: &StoreAction<A>) -> SliceValue {
        let prior = prior.and_then(|v| v.downcast::<S>().ok());
        (self.reduce)(prior, action)
    }
}

/// Merges independent slice reducers into one reducer over a [`StateTree`].
///
/// Every registered slice is visited on every action — including the reserved
/// init action, so each slice seeds its default state at store construction. A
/// builder with no slices is valid and produces an empty tree on every call.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ratchet::{CombinedReducer, Store, StoreAction, StoreError};
///
/// #[derive(Debug)]
/// enum Action {
///     Increment,
/// }
///
/// fn counter(state: Option<Arc<i32>>, action: &StoreAction<Action>) -> Arc<i32> {
///     let state = state.unwrap_or_else(|| Arc::new(0));
///     match action {
///         StoreAction::Action(Action::Increment) => Arc::new(*state + 1),
///         _ => state,
///     }
/// }
///
/// # fn main() -> Result<(), StoreError> {
/// let reducer = CombinedReducer::new().slice("counter", counter)?;
/// let store = Store::new(reducer);
///
/// store.dispatch(Action::Increment);
/// assert_eq!(*store.state().require::<i32>("counter")?, 1);
/// # Ok(())
/// # }
/// ```
pub struct CombinedReducer<A> {
    // Insertion order is visit order.
    slices: Vec<(&'static str, Box<dyn SliceReducer<A>>)>,
}

impl<A> CombinedReducer<A> {
    pub fn new() -> Self {
        Self { slices: Vec::new() }
    }

    /// Register a slice reducer under `key`.
    ///
    /// Registering the same key twice is a configuration error, surfaced
    /// immediately rather than silently resolved.
    pub fn slice<S, F>(mut self, key: &'static str, reduce: F) -> Result<Self, StoreError>
    where
        S: Send + Sync + 'static,
        F: Fn(Option<Arc<S>>, &StoreAction<A>) -> Arc<S> + Send + Sync + 'static,
    {
        if self.slices.iter().any(|(existing, _)| *existing == key) {
            return Err(StoreError::DuplicateSliceKey(key));
        }
        self.slices.push((
            key,
            Box::new(Slice {
                reduce,
                _state: PhantomData,
            }),
        ));
        Ok(self)
    }
}

impl<A> std::fmt::Debug for CombinedReducer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.slices.iter().map(|(key, _)| key))
            .finish()
    }
}

impl<A> Default for CombinedReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer<StateTree, A> for CombinedReducer<A> {
    fn reduce(&self, state: Option<Arc<StateTree>>, action: &StoreAction<A>) -> Arc<StateTree> {
        let mut next = BTreeMap::new();
        for (key, slice) in &self.slices {
            let prior = state.as_ref().and_then(|tree| tree.slices.get(key)).cloned();
            next.insert(*key, slice.reduce_slice(prior, action));
        }
        Arc::new(StateTree { slices: next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestAction {
        BumpLeft,
        BumpRight,
    }

    fn left(state: Option<Arc<u32>>, action: &StoreAction<TestAction>) -> Arc<u32> {
        let state = state.unwrap_or_else(|| Arc::new(10));
        match action {
            StoreAction::Action(TestAction::BumpLeft) => Arc::new(*state + 1),
            _ => state,
        }
    }

    fn right(state: Option<Arc<String>>, action: &StoreAction<TestAction>) -> Arc<String> {
        let state = state.unwrap_or_else(|| Arc::new("start".to_string()));
        match action {
            StoreAction::Action(TestAction::BumpRight) => Arc::new(format!("{state}!")),
            _ => state,
        }
    }

    fn combined() -> CombinedReducer<TestAction> {
        CombinedReducer::new()
            .slice("left", left)
            .unwrap()
            .slice("right", right)
            .unwrap()
    }

    #[test]
    fn init_seeds_every_slice() {
        let tree = combined().reduce(None, &StoreAction::Init);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.keys().collect::<Vec<_>>(), ["left", "right"]);
        assert_eq!(*tree.get::<u32>("left").unwrap(), 10);
        assert_eq!(*tree.get::<String>("right").unwrap(), "start");
    }

    #[test]
    fn untouched_slice_keeps_its_allocation() {
        let reducer = combined();
        let initial = reducer.reduce(None, &StoreAction::Init);
        let next = reducer.reduce(
            Some(initial.clone()),
            &StoreAction::Action(TestAction::BumpLeft),
        );

        assert_eq!(*next.get::<u32>("left").unwrap(), 11);
        assert!(Arc::ptr_eq(
            &initial.get::<String>("right").unwrap(),
            &next.get::<String>("right").unwrap(),
        ));
        assert!(!Arc::ptr_eq(
            &initial.get::<u32>("left").unwrap(),
            &next.get::<u32>("left").unwrap(),
        ));
    }

    #[test]
    fn empty_builder_yields_empty_tree() {
        let reducer: CombinedReducer<TestAction> = CombinedReducer::new();
        let tree = reducer.reduce(None, &StoreAction::Init);
        assert!(tree.is_empty());
        assert_eq!(tree.keys().count(), 0);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = CombinedReducer::new()
            .slice("left", left)
            .unwrap()
            .slice("left", left)
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateSliceKey("left"));
    }

    #[test]
    fn require_distinguishes_missing_from_mismatch() {
        let tree = combined().reduce(None, &StoreAction::Init);
        assert_eq!(
            tree.require::<u32>("nope").unwrap_err(),
            StoreError::MissingSlice("nope".to_string()),
        );
        assert_eq!(
            tree.require::<String>("left").unwrap_err(),
            StoreError::SliceTypeMismatch("left".to_string()),
        );
        assert!(tree.get::<String>("left").is_none());
    }
}
