use std::fmt;

use serde::Serialize;

use crate::trace::Trace;

/// The two addresses a verification call works with, kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    candidate_email: String,
    verifier_email: String,
}

impl VerificationRequest {
    pub fn new(candidate_email: impl Into<String>, verifier_email: impl Into<String>) -> Self {
        Self {
            candidate_email: candidate_email.into(),
            verifier_email: verifier_email.into(),
        }
    }

    pub fn candidate_email(&self) -> &str {
        &self.candidate_email
    }

    pub fn verifier_email(&self) -> &str {
        &self.verifier_email
    }

    pub fn candidate_domain(&self) -> &str {
        split_address(&self.candidate_email).1
    }

    pub fn candidate_local(&self) -> &str {
        split_address(&self.candidate_email).0
    }

    pub fn verifier_domain(&self) -> &str {
        split_address(&self.verifier_email).1
    }
}

/// Split at the last `@`. Without one, the whole input is the local part.
pub(crate) fn split_address(email: &str) -> (&str, &str) {
    email.rsplit_once('@').unwrap_or((email, ""))
}

/// Verification strategy chosen from the candidate's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    GenericSmtp,
    YahooWeb,
    HotmailWeb,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenericSmtp => f.write_str("generic SMTP"),
            Self::YahooWeb => f.write_str("Yahoo web"),
            Self::HotmailWeb => f.write_str("Hotmail web"),
        }
    }
}

/// Result of a single probe run.
///
/// Only `Verified` carries a definitive answer; the other variants become
/// `exists = false` at the orchestrator boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Verified(bool),
    TransportFailure(String),
    ProtocolAnomaly(String),
}

impl ProbeOutcome {
    pub fn exists(&self) -> bool {
        matches!(self, Self::Verified(true))
    }

    pub fn is_conclusive(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified(true) => f.write_str("verified: exists"),
            Self::Verified(false) => f.write_str("verified: does not exist"),
            Self::TransportFailure(reason) => write!(f, "unknown (transport failure: {reason})"),
            Self::ProtocolAnomaly(reason) => write!(f, "unknown (protocol anomaly: {reason})"),
        }
    }
}

/// Verdict returned by [`Verifier::verify`](crate::Verifier::verify).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub exists: bool,
    pub strategy: Option<Strategy>,
    pub trace: Trace,
}

impl VerificationResult {
    pub fn trace(&self) -> &[String] {
        self.trace.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_splits_on_last_at() {
        let request = VerificationRequest::new("\"a@b\"@Example.com", "probe@verifier.org");
        assert_eq!(request.candidate_local(), "\"a@b\"");
        assert_eq!(request.candidate_domain(), "Example.com");
        assert_eq!(request.verifier_domain(), "verifier.org");
    }

    #[test]
    fn only_verified_true_exists() {
        assert!(ProbeOutcome::Verified(true).exists());
        assert!(!ProbeOutcome::Verified(false).exists());
        assert!(!ProbeOutcome::TransportFailure("timeout".into()).exists());
        assert!(!ProbeOutcome::ProtocolAnomaly("421".into()).exists());
        assert!(!ProbeOutcome::ProtocolAnomaly("421".into()).is_conclusive());
    }
}
