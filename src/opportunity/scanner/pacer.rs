use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Spaces out callers so that at most one passes per `period`, across all tasks.
pub struct RequestPacer {
    period: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_slot: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next free slot. The first call passes immediately.
    pub async fn acquire(&self) {
        if self.period.is_zero() {
            return;
        }

        // Holding the lock while sleeping queues the other callers behind us.
        let mut next_slot = self.next_slot.lock().await;
        let now = Instant::now();
        let slot = match *next_slot {
            Some(next) if next > now => {
                sleep_until(next).await;
                next
            }
            _ => now,
        };
        *next_slot = Some(slot + self.period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::sleep;

    const PERIOD: Duration = Duration::from_millis(20);

    // Paused-clock timers fire on millisecond ticks, so allow a little slack above the slot.
    fn assert_slots(passed_at: &[Duration], slots: &[u32]) {
        assert_eq!(passed_at.len(), slots.len());
        for (at, slot) in passed_at.iter().zip(slots) {
            let expected = PERIOD * *slot;
            assert!(
                *at >= expected && *at < expected + Duration::from_millis(5),
                "passed at {at:?}, expected slot {expected:?}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let pacer = RequestPacer::new(Duration::from_secs(60));
        let start = Instant::now();
        pacer.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_acquires_are_spaced() {
        let pacer = RequestPacer::new(PERIOD);
        let start = Instant::now();

        let mut passed_at = Vec::new();
        for _ in 0..4 {
            pacer.acquire().await;
            passed_at.push(start.elapsed());
        }

        assert_slots(&passed_at, &[0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_share_the_ceiling() {
        let pacer = Arc::new(RequestPacer::new(PERIOD));
        let start = Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pacer = pacer.clone();
                tokio::spawn(async move {
                    pacer.acquire().await;
                    start.elapsed()
                })
            })
            .collect();

        let mut passed_at = Vec::new();
        for handle in handles {
            passed_at.push(handle.await.unwrap());
        }
        passed_at.sort();

        assert_slots(&passed_at, &[0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_does_not_allow_a_burst() {
        let pacer = RequestPacer::new(PERIOD);
        pacer.acquire().await;
        sleep(PERIOD * 5).await;

        let start = Instant::now();
        pacer.acquire().await;
        let first = start.elapsed();
        pacer.acquire().await;
        assert_slots(&[first, start.elapsed()], &[0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_never_waits() {
        let pacer = RequestPacer::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..100 {
            pacer.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
