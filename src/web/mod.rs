//! Provider web probes: replay the sign-up or sign-in flow of a webmail
//! provider and read its "identifier taken" signal.

mod client;
mod cookies;
mod error;
mod fields;
mod hotmail;
mod page;
mod yahoo;

pub use client::{HttpClient, HttpError, HttpResponse, ReqwestClient};
pub use cookies::CookieJar;
pub use error::WebProbeError;
pub use fields::FieldSet;
pub use hotmail::HotmailProbe;
pub use yahoo::YahooProbe;
