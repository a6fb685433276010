use crate::domain::error::CatalogError;
use std::future::Future;
use tracing::warn;

/// Run `primary`; on failure, run `fallback` once.
///
/// A rate-limited primary is returned as-is and the fallback never runs.
/// The fallback's own result is returned unchanged.
pub async fn fetch_with_fallback<T, P, PF, F, FF>(primary: P, fallback: F) -> Result<T, CatalogError>
where
    P: FnOnce() -> PF,
    PF: Future<Output = Result<T, CatalogError>>,
    F: FnOnce() -> FF,
    FF: Future<Output = Result<T, CatalogError>>,
{
    match primary().await {
        Ok(value) => Ok(value),
        Err(e) if e.is_rate_limited() => Err(e),
        Err(e) => {
            warn!(error = %e, "primary fetch failed, trying fallback");
            fallback().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let calls = AtomicUsize::new(0);
        let out = fetch_with_fallback(
            || async { Ok::<_, CatalogError>(1) },
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            },
        )
        .await
        .unwrap();

        assert_eq!(out, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_fallback_eligible() {
        let out = fetch_with_fallback(
            || async {
                let bad: Result<u32, _> = serde_json::from_str("not json");
                Ok::<_, CatalogError>(bad?)
            },
            || async { Ok(7) },
        )
        .await
        .unwrap();
        assert_eq!(out, 7);
    }
}
