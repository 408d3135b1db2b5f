//! Running an extraction off the calling thread.
//!
//! The walk itself is synchronous and single threaded. These helpers only
//! move one whole call onto another thread and hand back its single result.
//! There is no cancellation and no timeout.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::{bounded, Receiver};

use crate::error::{Error, Result};
use crate::extract::ExtractOptions;
use crate::model::ExtractionRecord;
use crate::source::Source;

/// Run [`extract_images_with_options`](crate::extract_images_with_options)
/// on a new worker thread.
///
/// The returned receiver yields exactly one message: the result, an
/// [`Error::Other`] if the extraction panicked, or an [`Error::Io`] if the
/// worker thread could not be started.
pub fn spawn_extraction(
    source: Source,
    options: ExtractOptions,
) -> Receiver<Result<Vec<ExtractionRecord>>> {
    spawn_worker("pdfimg-extract", move || {
        crate::extract_images_with_options(source, &options)
    })
}

/// Run `work` on a named thread and deliver its single result.
fn spawn_worker<T, W>(name: &str, work: W) -> Receiver<Result<T>>
where
    T: Send + 'static,
    W: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = bounded(1);
    let fallback = tx.clone();

    let spawned = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            // The caller may have dropped the receiver; nothing to report then.
            let _ = tx.send(catch_panic(work));
        });

    if let Err(e) = spawned {
        let _ = fallback.send(Err(Error::Io(e)));
    }
    rx
}

/// Run `work`, turning a panic into [`Error::Other`].
pub(crate) fn catch_panic<T>(work: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        log::error!("extraction panicked: {}", message);
        Err(Error::Other(format!("extraction panicked: {}", message)))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Run an extraction on tokio's blocking pool.
#[cfg(feature = "async")]
pub async fn extract_images_async(
    source: Source,
    options: ExtractOptions,
) -> Result<Vec<ExtractionRecord>> {
    tokio::task::spawn_blocking(move || crate::extract_images_with_options(source, &options))
        .await
        .map_err(|e| Error::Other(format!("extraction task panicked: {}", e)))?
}
