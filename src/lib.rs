#![forbid(unsafe_code)]
//! mailverify_lib: best-effort mailbox existence probing.
//!
//! [`verify`] checks both addresses syntactically, then picks a strategy from
//! the candidate's domain: a minimal SMTP dialogue with the domain's mail
//! host, or the sign-up/sign-in flow of a known webmail provider. Every step
//! is recorded in the returned [`Trace`].

pub mod mx;
pub mod smtp;
pub mod trace;
pub mod validator;
pub mod verify;
pub mod web;

pub use mx::{Error as MxError, LookupMx, MailHost, MxRecord, resolve_mail_host};
pub use smtp::{Connector, SmtpProbe, SmtpProbeError, TcpConnector};
pub use trace::Trace;
pub use validator::{ValidationMode, ValidationReport, validate_email};
pub use verify::{
    ClassifyError, HotmailPolarity, Probe, ProbeOutcome, Strategy, SystemVerifier,
    VerificationRequest, VerificationResult, Verifier, VerifyContext, VerifyError, VerifyOptions,
    classify, verify,
};
pub use web::{HotmailProbe, HttpClient, HttpResponse, ReqwestClient, YahooProbe};
