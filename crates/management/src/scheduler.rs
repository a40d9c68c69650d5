//! Time source for the simulated action handlers.
//!
//! Production code sleeps on the tokio timer. Tests swap in
//! [`ManualScheduler`], which returns immediately, records each requested
//! delay and advances a virtual clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;

#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, duration: Duration);

    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug)]
pub struct ManualScheduler {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualScheduler {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Every delay requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::starting_at(Utc::now())
    }
}

#[async_trait]
impl Scheduler for ManualScheduler {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        {
            let mut now = self.now.lock();
            *now += chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::zero());
        }
        // Give other in-flight handlers a turn, as a real timer would.
        tokio::task::yield_now().await;
    }

    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
