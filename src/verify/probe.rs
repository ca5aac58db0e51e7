use super::{ProbeOutcome, VerifyContext, VerifyError};

/// A single verification strategy.
///
/// Implementations log every step into the context trace. Ordinary network
/// failures are reported through [`ProbeOutcome`]; `Err` is reserved for
/// conditions the caller must see, such as an undecodable provider response.
pub trait Probe {
    fn probe(&self, ctx: &mut VerifyContext<'_>) -> Result<ProbeOutcome, VerifyError>;
}
