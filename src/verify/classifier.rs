use phf::phf_set;
use thiserror::Error;

use super::Strategy;

static YAHOO_DOMAINS: phf::Set<&'static str> = phf_set! {
    "yahoo.com",
};

static HOTMAIL_DOMAINS: phf::Set<&'static str> = phf_set! {
    "hotmail.com",
    "live.com",
    "outlook.com",
    "msn.com",
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("address has no '@'")]
    MissingAt,
    #[error("address has an empty domain")]
    EmptyDomain,
}

/// Map an address to the strategy that verifies it.
///
/// The domain is everything after the last `@`, compared against the provider
/// sets by exact, case-insensitive equality. Subdomains do not match.
pub fn classify(email: &str) -> Result<Strategy, ClassifyError> {
    let (_, domain) = email.rsplit_once('@').ok_or(ClassifyError::MissingAt)?;
    if domain.is_empty() {
        return Err(ClassifyError::EmptyDomain);
    }
    Ok(classify_domain(domain))
}

pub fn classify_domain(domain: &str) -> Strategy {
    let domain = domain.to_ascii_lowercase();
    if YAHOO_DOMAINS.contains(domain.as_str()) {
        Strategy::YahooWeb
    } else if HOTMAIL_DOMAINS.contains(domain.as_str()) {
        Strategy::HotmailWeb
    } else {
        Strategy::GenericSmtp
    }
}
