//! The dispatch interception layer.
//!
//! A middleware wraps a store's dispatch to add cross-cutting behavior without
//! touching reducers. The original curried shape
//! `api -> next -> action -> result` is expressed in two explicit stages:
//! [`Middleware::connect`] binds the restricted [`MiddlewareApi`], producing a
//! [`DispatchWrapper`] that is later applied to its `next` dispatch when
//! [`apply_middleware`] assembles the pipeline.

mod api;
mod apply;
mod logging;

pub use api::{DispatchFn, MiddlewareApi};
pub use apply::{apply_middleware, ApplyMiddleware};
pub use logging::LoggingMiddleware;

use crate::compose::Stage;

/// One layer of the dispatch pipeline, waiting for its `next` dispatch.
pub type DispatchWrapper<A> = Stage<DispatchFn<A>>;

/// An interception layer around dispatch.
///
/// `connect` receives the restricted store view and returns a wrapper; the
/// wrapper receives the next dispatch in the pipeline and returns this layer's
/// own dispatch. A layer that never calls `next` silently halts the pipeline —
/// that is a caller contract violation, documented and not defended against.
pub trait Middleware<S, A>: Send + Sync {
    fn connect(&self, api: MiddlewareApi<S, A>) -> DispatchWrapper<A>;
}
