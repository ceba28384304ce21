//! Race an adapter call against an orchestrator budget

use std::future::Future;
use std::time::Duration;

/// Await `call` for at most `budget`.
///
/// A call that loses the race is dropped, which aborts its in-flight HTTP
/// request. Both a lost race and a call that yielded nothing come back as
/// `None`.
pub async fn race<T, F>(label: &str, budget: Duration, call: F) -> Option<T>
where
    F: Future<Output = Option<T>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                "{} timed out after {}ms, using fallback",
                label,
                budget.as_millis()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fast_call_wins() {
        let result = race("fast", Duration::from_secs(1), async { Some(42) }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_none_passes_through() {
        let result: Option<u8> = race("empty", Duration::from_secs(1), async { None }).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_slow_call_loses_and_is_dropped() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let start = Instant::now();
        let result = race("slow", Duration::from_millis(50), async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            flag.store(true, Ordering::SeqCst);
            Some(1)
        })
        .await;

        assert!(result.is_none());
        assert!(start.elapsed() < Duration::from_secs(2));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
