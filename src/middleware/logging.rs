use std::fmt::Debug;
use std::sync::Arc;

use crate::middleware::{DispatchFn, DispatchWrapper, Middleware, MiddlewareApi};

/// Logs every action passing through the pipeline.
///
/// Actions are logged at `debug` level on the way in and the resulting state
/// at `trace` level on the way out. Output goes through the `log` facade, so
/// the host application chooses the backend.
pub struct LoggingMiddleware;

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: Debug + Send + Sync + 'static,
    A: Debug + 'static,
{
    fn connect(&self, api: MiddlewareApi<S, A>) -> DispatchWrapper<A> {
        Box::new(move |next| {
            Arc::new(move |action: A| {
                log::debug!("action: {action:?}");
                next(action);
                log::trace!("state after action: {:?}", api.state());
            }) as DispatchFn<A>
        })
    }
}
