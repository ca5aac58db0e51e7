use thiserror::Error;

use crate::mx::Error as MxError;
use crate::trace::Trace;
use crate::web::HttpError;

use super::Strategy;

/// Errors surfaced to callers of the verifier.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The provider answered with something that is not JSON. The probe
    /// logic is likely stale.
    #[error("{strategy} endpoint returned malformed JSON: {source}")]
    Decode {
        strategy: Strategy,
        #[source]
        source: serde_json::Error,
        /// Rows logged up to the failure.
        trace: Trace,
    },
    #[error("failed to encode {strategy} request: {message}")]
    Encode { strategy: Strategy, message: String },
    #[error(transparent)]
    Resolver(#[from] MxError),
    #[error("HTTP client initialization failed: {source}")]
    HttpInit {
        #[source]
        source: HttpError,
    },
}

impl VerifyError {
    pub(crate) fn decode(strategy: Strategy, source: serde_json::Error) -> Self {
        Self::Decode {
            strategy,
            source,
            trace: Trace::new(),
        }
    }

    pub(crate) fn with_trace(mut self, rows: Trace) -> Self {
        if let Self::Decode { trace, .. } = &mut self {
            *trace = rows;
        }
        self
    }

    /// Trace of the call that failed, when the error carries one.
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            Self::Decode { trace, .. } => Some(trace),
            _ => None,
        }
    }

    pub(crate) fn encode(strategy: Strategy, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            strategy,
            message: err.to_string(),
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
