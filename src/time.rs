use async_trait::async_trait;
use std::{any::Any, fmt::Debug, time::Duration};

/// Injected clock. Production uses wall time; simulations substitute a mock
/// so settle delays and interval waits fast-forward instead of blocking.
#[async_trait]
pub trait TimeProvider: Send + Sync + Debug {
    /// Current time as a Unix UTC timestamp.
    fn now(&self) -> i64;
    fn as_any(&self) -> &dyn Any;
    async fn sleep(&self, duration: Duration);
    /// Named bounded wait for sensor excitation settle. Timing precision is
    /// part of the calibration contract; only a simulated clock may shorten it.
    async fn settle(&self, millis: u64) {
        self.sleep(Duration::from_millis(millis)).await;
    }
    async fn advance_time(&self, seconds: i64);
    fn set(&self, new_time: i64);
}

#[derive(Debug)]
pub struct RealTimeProvider;

#[async_trait]
impl TimeProvider for RealTimeProvider {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn advance_time(&self, seconds: i64) {
        self.sleep(Duration::from_secs(seconds.max(0) as u64)).await;
    }

    fn set(&self, _new_time: i64) {}
}
