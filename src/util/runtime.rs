use crate::errors::{EpubError, EpubResult};
use std::future::Future;

/// Drives `future` to completion on a fresh current-thread runtime.
///
/// Synchronous entry points delegate to their asynchronous counterparts through
/// this function so both share one implementation.
/// Must not be called from within a tokio runtime.
pub(crate) fn block_on<T>(future: impl Future<Output = EpubResult<T>>) -> EpubResult<T> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(EpubError::Runtime)?
        .block_on(future)
}
