use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

struct Aggregation<R, E> {
    map: BTreeMap<String, R>,
    first_error: Option<E>,
}

/// Fan out one worker per key and merge the results into a single map.
///
/// `limit` bounds how many workers run at once; `None` spawns all of them
/// simultaneously. Failure policy: the first error observed (by completion
/// order) is captured exactly once; the remaining workers still run to
/// completion, and on the error path their results are discarded. The call
/// returns only after every worker has finished, yielding either the
/// complete map or the first error, never both.
pub async fn aggregate<R, E, F, Fut>(
    keys: impl IntoIterator<Item = String>,
    limit: Option<usize>,
    compute: F,
) -> Result<BTreeMap<String, R>, E>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
{
    let state = Arc::new(Mutex::new(Aggregation {
        map: BTreeMap::new(),
        first_error: None,
    }));
    let semaphore = limit.map(|permits| Arc::new(Semaphore::new(permits.max(1))));

    let mut workers = JoinSet::new();
    for key in keys {
        let work = compute(key.clone());
        let state = Arc::clone(&state);
        let semaphore = semaphore.clone();
        workers.spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            let outcome = work.await;
            let mut state = lock(&state);
            match outcome {
                Ok(result) => {
                    state.map.insert(key, result);
                }
                Err(err) => {
                    // Single-assignment guard: later failures are dropped.
                    if state.first_error.is_none() {
                        state.first_error = Some(err);
                    }
                }
            }
        });
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(err) = joined {
            tracing::warn!(error = %err, "aggregation worker did not complete");
        }
    }

    let mut state = lock(&state);
    if let Some(err) = state.first_error.take() {
        return Err(err);
    }
    Ok(std::mem::take(&mut state.map))
}

fn lock<R, E>(
    state: &Arc<Mutex<Aggregation<R, E>>>,
) -> std::sync::MutexGuard<'_, Aggregation<R, E>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
