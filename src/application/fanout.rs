use crate::domain::error::CatalogError;
use futures_util::future::{join_all, BoxFuture};
use std::future::Future;
use tracing::warn;

/// One named, independently failable unit of work.
pub struct SubFetch<T> {
    pub key: String,
    invoke: BoxFuture<'static, Result<T, CatalogError>>,
}

impl<T> SubFetch<T> {
    pub fn new<F>(key: impl Into<String>, fut: F) -> Self
    where
        F: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        Self {
            key: key.into(),
            invoke: Box::pin(fut),
        }
    }
}

impl<T> std::fmt::Debug for SubFetch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubFetch").field("key", &self.key).finish()
    }
}

/// Terminal state of one sub-fetch.
#[derive(Debug)]
pub enum Outcome<T> {
    Fulfilled(T),
    Rejected(CatalogError),
}

impl<T> Outcome<T> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Fulfilled(v) => Some(v),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Run every sub-fetch concurrently and settle all of them.
///
/// Each unit is spawned as its own task, so a slow or failing unit never
/// holds back or cancels another. Returns one outcome per input, in input
/// order, only once every unit has finished. A unit that panics is reported
/// as `Rejected`, like any other failure.
pub async fn run_all<T>(specs: Vec<SubFetch<T>>) -> Vec<Outcome<T>>
where
    T: Send + 'static,
{
    let (keys, handles): (Vec<_>, Vec<_>) = specs
        .into_iter()
        .map(|spec| (spec.key, tokio::spawn(spec.invoke)))
        .unzip();

    join_all(handles)
        .await
        .into_iter()
        .zip(keys)
        .map(|(joined, key)| match joined {
            Ok(Ok(value)) => Outcome::Fulfilled(value),
            Ok(Err(e)) => {
                warn!(key = %key, error = %e, "sub-fetch rejected");
                Outcome::Rejected(e)
            }
            Err(join_err) => {
                warn!(key = %key, error = %join_err, "sub-fetch task did not complete");
                Outcome::Rejected(CatalogError::SubFetch {
                    key,
                    reason: join_err.to_string(),
                })
            }
        })
        .collect()
}
