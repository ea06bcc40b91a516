//! Provider adapter contracts and their failure taxonomy.
//!
//! | Trait | Operation | Output |
//! |-------|-----------|--------|
//! | [`SeriesSource`] | intraday close series for one symbol | [`RawSeries`] |
//! | [`SummarySource`] | price / previous close / day range | [`PriceSummary`] |
//!
//! Adapters never retry. Every failure is reported once as a [`SourceError`];
//! its [`SourceErrorKind`] exists for logs and diagnostics, callers treat all
//! kinds alike.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::{HttpError, HttpResponse};
use crate::{PriceSummary, ProviderId, RawSeries, Symbol};

/// Adapter-level failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Required credentials are missing from the provider configuration.
    Unconfigured,
    /// The request timed out.
    Timeout,
    /// Connection or other transport failure.
    Network,
    /// Upstream answered with a non-success status.
    Status,
    /// The payload is not JSON or lacks the expected field.
    MalformedPayload,
    /// The series was present but held no finite value.
    EmptySeries,
}

/// Structured adapter error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unconfigured, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Network, message)
    }

    pub fn status(provider: ProviderId, status: u16) -> Self {
        Self::new(
            SourceErrorKind::Status,
            format!("{provider} returned status {status}"),
        )
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::MalformedPayload, message)
    }

    pub fn empty_series(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::EmptySeries, message)
    }

    /// Maps a transport failure, keeping timeouts distinct.
    pub fn transport(provider: ProviderId, error: &HttpError) -> Self {
        let message = format!("{provider} transport error: {}", error.message());
        if error.is_timeout() {
            Self::timeout(message)
        } else {
            Self::network(message)
        }
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unconfigured => "source.unconfigured",
            SourceErrorKind::Timeout => "source.timeout",
            SourceErrorKind::Network => "source.network",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
            SourceErrorKind::EmptySeries => "source.empty_series",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Returns the body of a successful response, or the matching status error.
pub(crate) fn success_body(
    provider: ProviderId,
    response: HttpResponse,
) -> Result<String, SourceError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(SourceError::status(provider, response.status))
    }
}

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Intraday close-series provider.
///
/// Implementations must be `Send + Sync`; one instance serves every
/// concurrent resolution in a batch.
pub trait SeriesSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches the close series for `symbol`, bounded by the adapter's timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on timeout or transport failure, a non-success
    /// status, a payload without the series field, or a series with no finite
    /// close.
    fn fetch_series<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, RawSeries>;
}

/// Price-summary provider used by market summaries and chat context.
pub trait SummarySource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Human-readable provider label reported to clients.
    fn label(&self) -> &'static str;

    fn fetch_summary<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceSummary>;
}
