use std::sync::{Arc, OnceLock, Weak};

use crate::store::StoreInner;

/// A dispatch function as threaded through the middleware pipeline.
pub type DispatchFn<A> = Arc<dyn Fn(A) + Send + Sync>;

/// The restricted store view handed to middleware: dispatch and state access
/// only, no subscribe.
///
/// `dispatch` is late-bound to the *final, fully wrapped* pipeline — a
/// middleware that dispatches recursively re-enters the whole pipeline rather
/// than bypassing the layers above it. The binding is filled in once the
/// pipeline has been composed; dispatching before then is a contract violation
/// and panics.
pub struct MiddlewareApi<S, A> {
    inner: Arc<StoreInner<S, A>>,
    // Weak, because the pipeline's closures capture this api: a strong
    // reference here would make the pipeline own itself.
    dispatch: Arc<OnceLock<Weak<dyn Fn(A) + Send + Sync>>>,
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<S, A> MiddlewareApi<S, A>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    pub(crate) fn new(inner: Arc<StoreInner<S, A>>) -> Self {
        Self {
            inner,
            dispatch: Arc::new(OnceLock::new()),
        }
    }

    pub(crate) fn bind(&self, dispatch: &DispatchFn<A>) {
        let _ = self.dispatch.set(Arc::downgrade(dispatch));
    }

    /// Dispatch through the full pipeline, outermost layer first.
    pub fn dispatch(&self, action: A) {
        match self.dispatch.get().and_then(Weak::upgrade) {
            Some(dispatch) => dispatch(action),
            None => panic!(
                "MiddlewareApi::dispatch called while the middleware pipeline is being constructed"
            ),
        }
    }

    /// The store's current state.
    pub fn state(&self) -> Arc<S> {
        self.inner.state()
    }
}
