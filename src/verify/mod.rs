//! Verification engine: classify the candidate's domain, run the matching
//! probe, collapse its outcome into a verdict.

mod classifier;
mod context;
mod error;
mod options;
mod probe;
mod types;
mod verifier;

pub use classifier::{ClassifyError, classify, classify_domain};
pub use context::VerifyContext;
pub use error::VerifyError;
pub use options::{HotmailPolarity, VerifyOptions};
pub use probe::Probe;
pub use types::{ProbeOutcome, Strategy, VerificationRequest, VerificationResult};
pub use verifier::{SystemVerifier, Verifier, verify};
