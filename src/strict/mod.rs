//! Strict handler adapters
//!
//! A strict handler takes a framework context plus an already decoded
//! request and resolves to a typed response or error. Middlewares wrap a
//! handler for one operation id and return a new handler, so the same
//! middleware can be applied to every operation of a server regardless of
//! which web framework drives it.

mod trace;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

pub use trace::TracingMiddleware;

type HandlerFn<C, Req, Resp, E> =
    dyn Fn(C, Req) -> BoxFuture<'static, Result<Resp, E>> + Send + Sync;

/// Cloneable async function from `(context, request)` to `Result<response, error>`.
pub struct StrictHandler<C, Req, Resp, E> {
    inner: Arc<HandlerFn<C, Req, Resp, E>>,
}

impl<C, Req, Resp, E> StrictHandler<C, Req, Resp, E>
where
    C: Send + 'static,
    Req: Send + 'static,
    Resp: Send + 'static,
    E: Send + 'static,
{
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(C, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Resp, E>> + Send + 'static,
    {
        let inner: Arc<HandlerFn<C, Req, Resp, E>> =
            Arc::new(move |ctx: C, req: Req| f(ctx, req).boxed());
        Self { inner }
    }

    pub fn call(&self, ctx: C, req: Req) -> BoxFuture<'static, Result<Resp, E>> {
        (self.inner)(ctx, req)
    }
}

impl<C, Req, Resp, E> Clone for StrictHandler<C, Req, Resp, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, Req, Resp, E> fmt::Debug for StrictHandler<C, Req, Resp, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictHandler").finish_non_exhaustive()
    }
}

/// Wraps the handler of a single operation.
pub trait StrictMiddleware<C, Req, Resp, E>: Send + Sync {
    fn wrap(
        &self,
        next: StrictHandler<C, Req, Resp, E>,
        operation_id: &'static str,
    ) -> StrictHandler<C, Req, Resp, E>;
}

/// Middleware built from a plain function, see [`middleware_fn`].
#[derive(Clone)]
pub struct FnMiddleware<F> {
    f: F,
}

impl<F, C, Req, Resp, E> StrictMiddleware<C, Req, Resp, E> for FnMiddleware<F>
where
    F: Fn(StrictHandler<C, Req, Resp, E>, &'static str) -> StrictHandler<C, Req, Resp, E>
        + Send
        + Sync,
{
    fn wrap(
        &self,
        next: StrictHandler<C, Req, Resp, E>,
        operation_id: &'static str,
    ) -> StrictHandler<C, Req, Resp, E> {
        (self.f)(next, operation_id)
    }
}

pub fn middleware_fn<F>(f: F) -> FnMiddleware<F> {
    FnMiddleware { f }
}

pub type SharedMiddleware<C, Req, Resp, E> = Arc<dyn StrictMiddleware<C, Req, Resp, E>>;

/// Wrap `handler` so that `middlewares[0]` runs first and the handler last.
pub fn apply_middlewares<C, Req, Resp, E>(
    handler: StrictHandler<C, Req, Resp, E>,
    operation_id: &'static str,
    middlewares: &[SharedMiddleware<C, Req, Resp, E>],
) -> StrictHandler<C, Req, Resp, E> {
    middlewares
        .iter()
        .rev()
        .fold(handler, |next, middleware| middleware.wrap(next, operation_id))
}
