use std::{future::Future, time::Duration};

use tracing::warn;

use crate::{
    errors::{SignalError, SignalResult},
    liveness::Liveness,
};

pub mod device;
pub mod dto;
pub mod traits;

pub mod prelude {
    pub use super::device::{Permission, StaticSource, UnsupportedSource};
    pub use super::dto::{DeviceCallRow, DeviceSmsRow};
    pub use super::traits::{CallLogSource, MessageSource};
}

/// Awaits a source read under `timeout`, giving up early if `liveness`
/// ends. A result that arrives after the consumer went away is dropped.
pub(crate) async fn fetch_within<T, F>(
    fetch: F,
    timeout: Duration,
    liveness: Option<&Liveness>,
) -> SignalResult<T>
where
    F: Future<Output = SignalResult<T>>,
{
    let bounded = async {
        match tokio::time::timeout(timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(SignalError::Timeout(timeout)),
        }
    };

    let result = match liveness {
        Some(liveness) => tokio::select! {
            biased;
            _ = liveness.ended() => Err(SignalError::Cancelled),
            result = bounded => result,
        },
        None => bounded.await,
    };

    if liveness.is_some_and(|l| !l.is_alive()) {
        warn!("consumer ended before fetch resolved, discarding result");
        return Err(SignalError::Cancelled);
    }

    if let Err(e) = &result {
        warn!(error = %e, "source fetch failed");
    }

    result
}
