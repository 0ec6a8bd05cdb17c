use crate::error::{CompressionError, Result};
use crate::processing::{CompressionResult, Engine};
use crate::resource::ImageResource;
use crate::utils::savings_percentage;
use std::sync::atomic::{AtomicBool, Ordering};

/// What happened to one submitted resource.
#[derive(Debug)]
pub enum BatchItem {
    Done(CompressionResult),
    Failed { name: String, error: CompressionError },
}

impl BatchItem {
    pub fn name(&self) -> &str {
        match self {
            BatchItem::Done(result) => result.name(),
            BatchItem::Failed { name, .. } => name,
        }
    }
}

/// All items of one batch, in submission order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub items: Vec<BatchItem>,
}

impl BatchOutcome {
    /// The result set: every successful result, in submission order.
    pub fn results(&self) -> impl Iterator<Item = &CompressionResult> {
        self.items.iter().filter_map(|item| match item {
            BatchItem::Done(result) => Some(result),
            BatchItem::Failed { .. } => None,
        })
    }

    pub fn into_results(self) -> Vec<CompressionResult> {
        self.items
            .into_iter()
            .filter_map(|item| match item {
                BatchItem::Done(result) => Some(result),
                BatchItem::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &CompressionError)> {
        self.items.iter().filter_map(|item| match item {
            BatchItem::Failed { name, error } => Some((name.as_str(), error)),
            BatchItem::Done(_) => None,
        })
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for item in &self.items {
            match item {
                BatchItem::Done(result) => {
                    summary.succeeded += 1;
                    summary.total_original += result.original_size();
                    summary.total_final += result.final_size();
                    if result.is_reencoded() {
                        summary.reencoded += 1;
                    }
                }
                BatchItem::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Totals over the successful items of a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub reencoded: usize,
    pub total_original: u64,
    pub total_final: u64,
}

impl BatchSummary {
    pub fn savings_percentage(&self) -> Option<f64> {
        savings_percentage(self.total_original, self.total_final)
    }
}

/// Fans every resource out to its own task and joins them in order.
///
/// A failing resource becomes a [`BatchItem::Failed`]; its siblings still run
/// to completion. Nothing bounds how many pipelines run at once.
pub async fn process_batch(engine: &Engine, resources: Vec<ImageResource>) -> BatchOutcome {
    process_batch_with_progress(engine, resources, |_| {}).await
}

/// Same as [`process_batch`], calling `on_settled` as each item is joined.
pub async fn process_batch_with_progress<F>(
    engine: &Engine,
    resources: Vec<ImageResource>,
    mut on_settled: F,
) -> BatchOutcome
where
    F: FnMut(&BatchItem),
{
    tracing::info!(count = resources.len(), "starting batch");

    let handles: Vec<_> = resources
        .into_iter()
        .map(|resource| {
            let name = resource.name().to_string();
            let engine = engine.clone();
            let handle = tokio::spawn(async move { engine.compress(resource).await });
            (name, handle)
        })
        .collect();

    let mut items = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let settled = match handle.await {
            Ok(result) => result,
            Err(e) => Err(CompressionError::TaskFailed(e.to_string())),
        };
        let item = match settled {
            Ok(result) => BatchItem::Done(result),
            Err(error) => {
                tracing::warn!(name = %name, error = %error, "resource failed");
                BatchItem::Failed { name, error }
            }
        };
        on_settled(&item);
        items.push(item);
    }

    BatchOutcome { items }
}

/// Owns the engine and refuses overlapping batch submissions.
#[derive(Debug)]
pub struct BatchProcessor {
    engine: Engine,
    busy: AtomicBool,
}

/// Clears the busy flag when the batch finishes or its future is dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BatchProcessor {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Processes one batch; fails with `BatchInProgress` while another runs.
    pub async fn submit(&self, resources: Vec<ImageResource>) -> Result<BatchOutcome> {
        self.submit_with_progress(resources, |_| {}).await
    }

    pub async fn submit_with_progress<F>(
        &self,
        resources: Vec<ImageResource>,
        on_settled: F,
    ) -> Result<BatchOutcome>
    where
        F: FnMut(&BatchItem),
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CompressionError::BatchInProgress);
        }
        let _guard = BusyGuard(&self.busy);

        Ok(process_batch_with_progress(&self.engine, resources, on_settled).await)
    }
}
