//! DNS resolution of the mail host for a domain.
//!
//! The entry point is [`resolve_mail_host`], which picks the preferred MX
//! exchange, falls back to the domain's own address records, and accepts IP
//! address literals without any lookup.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{
    LookupMx, build_resolver, resolve_host_address, resolve_mail_host, select_preferred,
};
pub use types::{HostSource, MailHost, MxRecord};
