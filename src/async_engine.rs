//! Async wrapper around [`LayoutEngine`] for use in async runtimes.
//!
//! Classification is CPU-bound apart from the lookup suspension point, so
//! all operations run on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{LayoutError, Result};
use crate::layouts::CardLayout;
use crate::LayoutEngine;

/// Async wrapper around a shared [`LayoutEngine`].
///
/// The engine is `Send + Sync`, so no lock is needed; every operation
/// clones the inner [`Arc`] into a blocking task.
///
/// # Example
///
/// ```no_run
/// # use std::path::PathBuf;
/// # use cardlayout::{AsyncLayoutEngine, LayoutEngine};
/// # async fn example(engine: LayoutEngine) -> cardlayout::Result<()> {
/// let engine = AsyncLayoutEngine::new(engine);
/// let layout = engine.classify_file(PathBuf::from("art/Lightning Bolt.png")).await?;
/// # Ok(())
/// # }
/// ```
pub struct AsyncLayoutEngine {
    inner: Arc<LayoutEngine>,
}

impl AsyncLayoutEngine {
    /// Wrap an already-built engine.
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            inner: Arc::new(engine),
        }
    }

    /// Run a sync engine operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LayoutEngine) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let engine = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&engine))
            .await
            .map_err(|e| LayoutError::Config(format!("task join error: {e}")))?
    }

    /// Classify one art file asynchronously.
    pub async fn classify_file(&self, path: PathBuf) -> Result<CardLayout> {
        self.run(move |engine| engine.classify_file(&path)).await
    }

    /// Classify a batch of art files asynchronously.
    ///
    /// The worker pool itself runs inside one blocking task; see
    /// [`LayoutEngine::classify_batch`].
    pub async fn classify_batch(
        &self,
        files: Vec<PathBuf>,
        workers: usize,
    ) -> Result<Vec<Result<CardLayout>>> {
        self.run(move |engine| Ok(engine.classify_batch(&files, workers)))
            .await
    }

    /// Access the wrapped engine.
    pub fn engine(&self) -> &LayoutEngine {
        &self.inner
    }
}
