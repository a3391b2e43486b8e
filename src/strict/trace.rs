use std::fmt::Display;
use std::time::Instant;

use tracing::{debug, info_span, warn, Instrument};

use super::{StrictHandler, StrictMiddleware};

/// Runs each operation inside an `operation` span and logs how it ended.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl<C, Req, Resp, E> StrictMiddleware<C, Req, Resp, E> for TracingMiddleware
where
    C: Send + 'static,
    Req: Send + 'static,
    Resp: Send + 'static,
    E: Display + Send + 'static,
{
    fn wrap(
        &self,
        next: StrictHandler<C, Req, Resp, E>,
        operation_id: &'static str,
    ) -> StrictHandler<C, Req, Resp, E> {
        StrictHandler::new(move |ctx, req| {
            let call = next.call(ctx, req);
            let span = info_span!("operation", operation_id = %operation_id);
            async move {
                let started = Instant::now();
                let result = call.await;
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                match &result {
                    Ok(_) => debug!(elapsed_ms, "operation completed"),
                    Err(err) => warn!(elapsed_ms, error = %err, "operation failed"),
                }
                result
            }
            .instrument(span)
        })
    }
}
