//! Deadline racing
//!
//! Runs a future against a monotonic timer. If the timer wins, the future is
//! dropped (which aborts an in-flight HTTP request) and the caller gets
//! `None`.

use std::future::Future;
use std::time::Duration;

/// Await `fut`, giving up after `deadline`
pub async fn with_deadline<F>(deadline: Duration, fut: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::time::timeout(deadline, fut).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_future_wins() {
        let result = with_deadline(Duration::from_secs(1), async { 42 }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_timer_wins_over_slow_future() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            42
        };
        let result = with_deadline(Duration::from_millis(10), slow).await;
        assert_eq!(result, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_is_exact_with_paused_clock() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(8001)).await;
            "late"
        };
        assert_eq!(with_deadline(Duration::from_millis(8000), slow).await, None);

        let on_time = async {
            tokio::time::sleep(Duration::from_millis(7999)).await;
            "on time"
        };
        assert_eq!(
            with_deadline(Duration::from_millis(8000), on_time).await,
            Some("on time")
        );
    }
}
