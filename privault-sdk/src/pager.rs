use crate::envelope::ListEnvelope;
use crate::error::Result;
use crate::http::RestClient;
use serde_json::Value;
use tokio::sync::mpsc;

/// One network round trip's worth of decoded items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
}

/// Consumer half of a paginated listing.
///
/// Pages arrive in strict request order. A mid-stream transport, status, or
/// decode failure is logged and then surfaced as one terminal `Err` item
/// before the stream closes, so exhaustion and abortion are
/// distinguishable. Dropping the pager closes the channel and the producer
/// task exits on its next send.
pub struct Pager<T> {
    rx: mpsc::Receiver<Result<Page<T>>>,
}

impl<T> Pager<T> {
    /// Next page, or `None` once the stream is exhausted.
    pub async fn next_page(&mut self) -> Option<Result<Page<T>>> {
        self.rx.recv().await
    }

    /// Drain every remaining page into a flat item list, stopping at the
    /// first stream error.
    pub async fn try_collect(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page?.items);
        }
        Ok(items)
    }
}

/// Start a background listing task following continuation cursors.
///
/// Each GET uses the current query; a returned cursor *replaces* the query
/// for the following request. The channel holds at most one undelivered
/// page, so page N+1 is never requested before page N has been handed off.
pub(crate) fn stream<T, D>(
    client: RestClient,
    path: String,
    initial_query: Vec<(String, String)>,
    decode_item: D,
) -> Pager<T>
where
    T: Send + 'static,
    D: Fn(Value) -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let mut query = initial_query;
        loop {
            let body = match client.get_json(&path, &query).await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "listing request failed");
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            };

            let envelope = match ListEnvelope::parse(body) {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "listing envelope was malformed");
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            };

            let mut items = Vec::with_capacity(envelope.items.len());
            let mut failed = None;
            for raw in envelope.items {
                match decode_item(raw) {
                    Ok(item) => items.push(item),
                    Err(err) => {
                        failed = Some(err);
                        break;
                    }
                }
            }
            if let Some(err) = failed {
                tracing::warn!(path = %path, error = %err, "listing item failed to decode");
                let _ = tx.send(Err(err)).await;
                return;
            }

            if tx.send(Ok(Page { items })).await.is_err() {
                // Consumer dropped the pager; stop fetching.
                return;
            }

            match envelope.cursor {
                Some(cursor) => query = cursor.into_query(),
                None => return,
            }
        }
    });

    Pager { rx }
}
