use std::sync::Arc;

use crate::reducer::Reducer;
use crate::store::Store;

/// A boxed store constructor: reducer plus optional preloaded state in, store
/// out. Enhancers consume one of these and hand back another.
pub type StoreCreator<S, A> =
    Box<dyn FnOnce(Box<dyn Reducer<S, A>>, Option<Arc<S>>) -> Store<S, A>>;

/// A transformation of the store constructor itself.
///
/// Enhancers wrap construction, not just dispatch: the returned creator is free
/// to build the underlying store, rewrap parts of it, and hand back a modified
/// store value. [`apply_middleware`](crate::middleware::apply_middleware) is
/// the canonical enhancer; others compose the same way.
pub trait Enhancer<S, A> {
    /// Wrap `create`, returning the constructor the store builder will invoke.
    fn enhance(self: Box<Self>, create: StoreCreator<S, A>) -> StoreCreator<S, A>;
}
