use crate::trace::Trace;

use super::VerificationRequest;

/// Per-call state threaded through every probe step.
///
/// Built fresh by each `verify` call and consumed when the verdict is
/// assembled, so nothing leaks between calls.
#[derive(Debug)]
pub struct VerifyContext<'a> {
    request: &'a VerificationRequest,
    trace: Trace,
}

impl<'a> VerifyContext<'a> {
    pub fn new(request: &'a VerificationRequest) -> Self {
        Self {
            request,
            trace: Trace::new(),
        }
    }

    pub fn request(&self) -> &'a VerificationRequest {
        self.request
    }

    pub fn log(&mut self, row: impl Into<String>) {
        self.trace.push(row);
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }
}
