use crate::time::TimeProvider;
use async_trait::async_trait;
use std::{
    any::Any,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::Duration,
};

/// Simulated clock: sleeps and settle waits return immediately, time moves
/// only when the loop (or a test) advances it.
#[derive(Debug)]
pub struct MockTimeProvider {
    current_time: Arc<AtomicI64>,
}

impl MockTimeProvider {
    pub fn new(start_time: i64) -> Self {
        Self { current_time: Arc::new(AtomicI64::new(start_time)) }
    }
}

#[async_trait]
impl TimeProvider for MockTimeProvider {
    fn now(&self) -> i64 {
        self.current_time.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn sleep(&self, _duration: Duration) {}

    async fn advance_time(&self, seconds: i64) {
        self.current_time.fetch_add(seconds, Ordering::SeqCst);
    }

    fn set(&self, new_time: i64) {
        self.current_time.store(new_time, Ordering::SeqCst)
    }
}
