use thiserror::Error;

/// Failures surfaced by a [`crate::ListingPage`] implementation.
///
/// These are transport-level: the scraping pipeline maps them into
/// [`ScrapeError`] variants at the call sites where the operation's intent
/// is known (a timeout during navigation is not the same failure as a
/// timeout waiting for the listing container).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{what} timed out after {timeout_secs}s")]
    Timeout { what: String, timeout_secs: u64 },

    #[error("browser protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session-fatal scraping failures.
///
/// Per-row parse failures are deliberately NOT represented here: a malformed
/// listing element yields a record with absent fields and the batch
/// continues. Everything in this enum aborts the session and becomes the
/// single top-level error in the response envelope.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page failed to reach its load state within budget.
    #[error("navigation to {url} timed out after {timeout_secs}s")]
    NavigationTimeout { url: String, timeout_secs: u64 },

    /// A required container never appeared. Distinct from "container
    /// appeared but is empty", which is not an error.
    #[error("selector {selector} never appeared within {timeout_secs}s")]
    SelectorNotFound { selector: String, timeout_secs: u64 },

    /// The session completed without admitting a single priced record.
    /// Callers must be able to distinguish "nothing to show" from "site
    /// changed, adapter broken", so this is a failure, not an empty success.
    #[error("No Listings Found")]
    EmptyResult,

    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),
}

impl ScrapeError {
    /// Maps an engine timeout to a navigation timeout, passing other engine
    /// failures through.
    pub(crate) fn from_navigation(error: EngineError, url: &str) -> Self {
        match error {
            EngineError::Timeout { timeout_secs, .. } => ScrapeError::NavigationTimeout {
                url: url.to_owned(),
                timeout_secs,
            },
            other => ScrapeError::Engine(other),
        }
    }

    /// Maps an engine timeout to a missing required selector, passing other
    /// engine failures through.
    pub(crate) fn from_container_wait(error: EngineError, selector: &str) -> Self {
        match error {
            EngineError::Timeout { timeout_secs, .. } => ScrapeError::SelectorNotFound {
                selector: selector.to_owned(),
                timeout_secs,
            },
            other => ScrapeError::Engine(other),
        }
    }
}
