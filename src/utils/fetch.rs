//! Network fetching with timeout support.
//!
//! Provides [`race_with_timeout`] and the browser [`FetchTransport`] built on
//! `gloo-net` and `gloo-timers`.

use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::AbortController;

use crate::core::api::{RawResponse, Transport};
use crate::utils::log;

// =============================================================================
// Future Racing Utilities
// =============================================================================

/// Result of a race against a deadline.
#[derive(Debug, PartialEq)]
pub enum RaceResult<T> {
    /// The operation completed before the deadline.
    Completed(T),
    /// The deadline fired first. The operation has been dropped.
    TimedOut,
}

/// Race a future against a deadline.
///
/// Whichever side loses is dropped before this function returns, so a timed
/// out request is cancelled and a pending timer is cleared on every path.
pub async fn race_with_timeout<F, D>(operation: F, deadline: D) -> RaceResult<F::Output>
where
    F: Future,
    D: Future<Output = ()>,
{
    let operation = pin!(operation);
    let deadline = pin!(deadline);

    match select(operation, deadline).await {
        Either::Left((output, _)) => RaceResult::Completed(output),
        Either::Right(((), _)) => RaceResult::TimedOut,
    }
}

// =============================================================================
// Browser Transport
// =============================================================================

/// Aborts the underlying fetch if dropped before [`AbortOnDrop::disarm`].
struct AbortOnDrop(Option<AbortController>);

impl AbortOnDrop {
    fn new() -> Self {
        match AbortController::new() {
            Ok(controller) => Self(Some(controller)),
            Err(_) => {
                log::warn("AbortController unavailable; timed out requests will not be aborted");
                Self(None)
            }
        }
    }

    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(controller) = self.0.take() {
            controller.abort();
        }
    }
}

/// Fetch API transport for the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<RawResponse, String>> {
        let url = url.to_string();
        let headers: Vec<(String, String)> = headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        async move {
            let abort = AbortOnDrop::new();
            let signal = abort.0.as_ref().map(AbortController::signal);

            let mut request = Request::get(&url).abort_signal(signal.as_ref());
            for (name, value) in &headers {
                request = request.header(name, value);
            }

            let response = request.send().await.map_err(|e| e.to_string())?;
            // An unreadable body is not a transport failure; the caller falls
            // back to the status line.
            let body = response.text().await.ok();
            abort.disarm();

            Ok(RawResponse {
                status: response.status(),
                status_text: response.status_text(),
                body,
            })
        }
    }

    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        TimeoutFuture::new(ms)
    }
}
