use crate::compose::compose;
use crate::middleware::{DispatchWrapper, Middleware, MiddlewareApi};
use crate::store::{Enhancer, StoreCreator};

/// The middleware-application enhancer, built by [`apply_middleware`].
pub struct ApplyMiddleware<S, A> {
    middlewares: Vec<Box<dyn Middleware<S, A>>>,
}

/// Build a store enhancer that replaces dispatch with a middleware pipeline.
///
/// Middlewares are layered in the order given: for `[a, b]`, an action passes
/// through `a`'s pre-logic, then `b`'s, then the base dispatch and reducer,
/// then back out through `b` and `a`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ratchet::{apply_middleware, LoggingMiddleware, Middleware, Store, StoreAction};
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
/// let store = Store::builder(counter)
///     .enhancer(apply_middleware(vec![
///         Box::new(LoggingMiddleware) as Box<dyn Middleware<_, _>>,
///     ]))
///     .build();
///
/// store.dispatch(Action::Increment);
/// assert_eq!(*store.state(), 1);
/// ```
pub fn apply_middleware<S, A>(
    middlewares: Vec<Box<dyn Middleware<S, A>>>,
) -> ApplyMiddleware<S, A> {
    ApplyMiddleware { middlewares }
}

impl<S, A> Enhancer<S, A> for ApplyMiddleware<S, A>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    fn enhance(self: Box<Self>, create: StoreCreator<S, A>) -> StoreCreator<S, A> {
        Box::new(move |reducer, preloaded| {
            let store = create(reducer, preloaded);

            // Two-phase construction: every middleware connects against an api
            // whose dispatch is still unbound, the wrappers are composed around
            // the store's current dispatch, and only then is the api's dispatch
            // bound to the finished pipeline.
            let api = MiddlewareApi::new(store.inner());
            let chain: Vec<DispatchWrapper<A>> = self
                .middlewares
                .iter()
                .map(|middleware| middleware.connect(api.clone()))
                .collect();
            let dispatch = compose(chain)(store.dispatch_fn());
            api.bind(&dispatch);

            store.with_dispatch(dispatch)
        })
    }
}
