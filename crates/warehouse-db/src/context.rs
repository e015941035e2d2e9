//! # Request Context
//!
//! The execution context every engine call runs under: a request id for
//! log correlation and a deadline bounding all store work of the call.
//!
//! ```text
//!   adapter                    engine                       store
//!   ───────                    ──────                       ─────
//!   RequestContext::new ──►  ctx.run("sell_product", ..) ──► BEGIN ... COMMIT
//!   (rid, now + timeout)        │
//!                               └─ deadline hit: the future is dropped,
//!                                  the open transaction rolls back,
//!                                  DeadlineExceeded is returned
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::error::{InventoryError, InventoryResult};

/// Per-call execution context.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    deadline: Instant,
}

impl RequestContext {
    /// Creates a context whose deadline is `timeout` from now.
    pub fn new(request_id: impl Into<String>, timeout: Duration) -> Self {
        RequestContext {
            request_id: request_id.into(),
            deadline: Instant::now() + timeout,
        }
    }

    /// Creates a context with an absolute deadline.
    pub fn with_deadline(request_id: impl Into<String>, deadline: Instant) -> Self {
        RequestContext {
            request_id: request_id.into(),
            deadline,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Runs `operation` under this context's deadline.
    ///
    /// An already-expired deadline fails before any store work starts.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> InventoryResult<T>
    where
        F: Future<Output = InventoryResult<T>>,
    {
        if self.remaining().is_zero() {
            warn!(rid = %self.request_id, operation, "Deadline already passed");
            return Err(InventoryError::DeadlineExceeded { operation });
        }

        match tokio::time::timeout_at(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(rid = %self.request_id, operation, "Deadline exceeded, transaction abandoned");
                Err(InventoryError::DeadlineExceeded { operation })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    #[tokio::test]
    async fn test_run_within_deadline() {
        let ctx = RequestContext::new("rid-1", Duration::from_secs(5));
        let value = ctx.run("noop", async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(ctx.request_id(), "rid-1");
    }

    #[tokio::test]
    async fn test_expired_deadline_skips_work() {
        let ctx = RequestContext::new("rid-2", Duration::ZERO);
        let result: InventoryResult<()> = ctx
            .run("noop", async {
                Err(InventoryError::Query(DbError::QueryFailed("ran".to_string())))
            })
            .await;
        assert!(matches!(
            result,
            Err(InventoryError::DeadlineExceeded { operation: "noop" })
        ));
    }

    #[tokio::test]
    async fn test_slow_operation_times_out() {
        let ctx = RequestContext::new("rid-3", Duration::from_millis(20));
        let result: InventoryResult<()> = ctx
            .run("slow", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(
            result,
            Err(InventoryError::DeadlineExceeded { operation: "slow" })
        ));
    }
}
