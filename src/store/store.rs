use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::action::StoreAction;
use crate::middleware::DispatchFn;
use crate::reducer::Reducer;
use crate::store::{Enhancer, StoreCreator};

struct Listener {
    id: usize,
    callback: Arc<dyn Fn() + Send + Sync>,
}

/// Shared guts of a store: the state cell, the listener registry and the
/// reducer. Enhanced stores are new [`Store`] handles over the same inner.
pub(crate) struct StoreInner<S, A> {
    state: RwLock<Arc<S>>,
    listeners: Arc<RwLock<Vec<Listener>>>,
    next_listener_id: AtomicUsize,
    reducer: Box<dyn Reducer<S, A>>,
}

impl<S, A> StoreInner<S, A>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    pub(crate) fn state(&self) -> Arc<S> {
        self.state.read().unwrap().clone()
    }

    /// The unwrapped dispatch: reduce, replace, notify. No lock is held while
    /// the reducer or any listener runs, so listeners may dispatch again,
    /// subscribe or unsubscribe. A reducer panic propagates before the state
    /// cell is touched, leaving the prior state in place.
    fn dispatch_raw(&self, action: A) {
        let action = StoreAction::Action(action);
        let prior = self.state.read().unwrap().clone();
        let next = self.reducer.reduce(Some(prior), &action);
        *self.state.write().unwrap() = next;
        self.notify();
    }

    fn notify(&self) {
        // Snapshot the callbacks so the registry may change mid-notification:
        // every listener present at this point fires exactly once this cycle.
        let snapshot: Vec<Arc<dyn Fn() + Send + Sync>> = self
            .listeners
            .read()
            .unwrap()
            .iter()
            .map(|listener| listener.callback.clone())
            .collect();
        log::trace!("state replaced, notifying {} listeners", snapshot.len());
        for callback in snapshot {
            callback();
        }
    }
}

/// A unidirectional state container.
///
/// The store owns the current state and replaces it — never mutates it — by
/// running every dispatched action through its reducer, then notifying
/// subscribers in registration order. Handles are cheap to clone and share the
/// same state cell.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ratchet::{Store, StoreAction};
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
/// let store = Store::new(counter);
/// assert_eq!(*store.state(), 0);
///
/// store.dispatch(Action::Increment);
/// assert_eq!(*store.state(), 1);
/// ```
pub struct Store<S, A> {
    inner: Arc<StoreInner<S, A>>,
    dispatch: DispatchFn<A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    /// Create a store with no preloaded state and no enhancer.
    ///
    /// The reserved init action runs immediately so the reducer seeds its
    /// default state before anything can read it.
    pub fn new(reducer: impl Reducer<S, A> + 'static) -> Self {
        Self::from_parts(Box::new(reducer), None)
    }

    /// Configure a store with optional preloaded state and enhancer.
    pub fn builder(reducer: impl Reducer<S, A> + 'static) -> StoreBuilder<S, A> {
        StoreBuilder {
            reducer: Box::new(reducer),
            preloaded: None,
            enhancer: None,
        }
    }

    fn from_parts(reducer: Box<dyn Reducer<S, A>>, preloaded: Option<Arc<S>>) -> Self {
        // The init action runs before the state cell exists. No listener can
        // be registered yet, so this is observationally the same as pushing
        // it through the raw dispatch path.
        let initial = reducer.reduce(preloaded, &StoreAction::Init);
        let inner = Arc::new(StoreInner {
            state: RwLock::new(initial),
            listeners: Arc::new(RwLock::new(Vec::new())),
            next_listener_id: AtomicUsize::new(0),
            reducer,
        });
        let dispatch = {
            let inner = Arc::clone(&inner);
            Arc::new(move |action| inner.dispatch_raw(action)) as DispatchFn<A>
        };
        Self { inner, dispatch }
    }

    /// Apply an action: run the reducer, replace the state, notify listeners.
    ///
    /// Synchronous; returns once every listener has run. On an enhanced store
    /// the action enters the middleware pipeline first. Dispatching from
    /// inside a reducer is undefined behavior and is not guarded against.
    pub fn dispatch(&self, action: A) {
        (self.dispatch)(action)
    }

    /// The current state. Callers share the `Arc` and cannot mutate it.
    pub fn state(&self) -> Arc<S> {
        self.inner.state()
    }

    /// Register a listener, fired after every state replacement with no
    /// arguments; it re-reads state through [`state`](Self::state).
    ///
    /// Listeners fire in registration order. The returned [`Subscription`]
    /// removes exactly this registration.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.inner.listeners.write().unwrap().push(Listener {
            id,
            callback: Arc::new(listener),
        });
        Subscription {
            id,
            listeners: Arc::downgrade(&self.inner.listeners),
        }
    }

    pub(crate) fn inner(&self) -> Arc<StoreInner<S, A>> {
        Arc::clone(&self.inner)
    }

    pub(crate) fn dispatch_fn(&self) -> DispatchFn<A> {
        Arc::clone(&self.dispatch)
    }

    /// The same store with its dispatch replaced — state cell and listener
    /// registry are shared with `self`.
    pub(crate) fn with_dispatch(&self, dispatch: DispatchFn<A>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch,
        }
    }
}

/// Handle for removing a registered listener.
///
/// Removal targets exactly the registration that produced this handle;
/// unsubscribing twice is a no-op and never affects another listener. Dropping
/// the handle leaves the listener registered.
pub struct Subscription {
    id: usize,
    listeners: Weak<RwLock<Vec<Listener>>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.write().unwrap().retain(|l| l.id != self.id);
        }
    }
}

/// Named-option store construction.
///
/// Replaces the positional `createStore(reducer, preloadedState?, enhancer?)`
/// overload: preloaded state and enhancer are explicit options, so the
/// "preloaded state is secretly the enhancer" call shape cannot be expressed.
pub struct StoreBuilder<S, A> {
    reducer: Box<dyn Reducer<S, A>>,
    preloaded: Option<Arc<S>>,
    enhancer: Option<Box<dyn Enhancer<S, A>>>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    /// Start from this state instead of letting reducers seed their defaults.
    ///
    /// The reserved init action still runs; reducers see this value as their
    /// prior state.
    pub fn preloaded_state(mut self, state: impl Into<Arc<S>>) -> Self {
        self.preloaded = Some(state.into());
        self
    }

    /// Wrap store construction with an enhancer. When set, the enhancer's
    /// creator builds the store and the raw construction path is bypassed.
    pub fn enhancer(mut self, enhancer: impl Enhancer<S, A> + 'static) -> Self {
        self.enhancer = Some(Box::new(enhancer));
        self
    }

    pub fn build(self) -> Store<S, A> {
        let create: StoreCreator<S, A> = Box::new(Store::from_parts);
        let create = match self.enhancer {
            Some(enhancer) => enhancer.enhance(create),
            None => create,
        };
        create(self.reducer, self.preloaded)
    }
}
