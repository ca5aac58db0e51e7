use std::borrow::Cow;
use std::time::Duration;

use crate::validator::ValidationMode;

/// How the Hotmail `IfExistsResult` flag maps to mailbox existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotmailPolarity {
    /// Absent or falsy flag means the account exists. This is what the
    /// endpoint has been observed to require, despite the field's name.
    #[default]
    Observed,
    /// Truthy flag means the account exists.
    TruthyMeansExists,
}

impl HotmailPolarity {
    pub fn exists(self, flag_truthy: bool) -> bool {
        match self {
            Self::Observed => !flag_truthy,
            Self::TruthyMeansExists => flag_truthy,
        }
    }
}

/// Controls how [`Verifier`](crate::Verifier) validates and probes.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub validation_mode: ValidationMode,
    pub smtp_port: u16,
    pub helo_domain: Option<String>,
    pub dns_timeout: Duration,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
    pub http_timeout: Duration,
    pub hotmail_polarity: HotmailPolarity,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::Strict,
            smtp_port: 25,
            helo_domain: None,
            dns_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(10),
            http_timeout: Duration::from_secs(15),
            hotmail_polarity: HotmailPolarity::Observed,
        }
    }
}

impl VerifyOptions {
    /// Returns the name sent with `HELO`. Defaults to the verifier's domain.
    pub fn helo_domain<'a>(&'a self, verifier_domain: &'a str) -> Cow<'a, str> {
        self.helo_domain
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Borrowed(verifier_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helo_defaults_to_verifier_domain() {
        let options = VerifyOptions::default();
        assert_eq!(options.helo_domain("verifier.org"), "verifier.org");

        let options = VerifyOptions {
            helo_domain: Some("mx.probe.test".into()),
            ..VerifyOptions::default()
        };
        assert_eq!(options.helo_domain("verifier.org"), "mx.probe.test");
    }

    #[test]
    fn polarity_flips_mapping() {
        assert!(HotmailPolarity::Observed.exists(false));
        assert!(!HotmailPolarity::Observed.exists(true));
        assert!(HotmailPolarity::TruthyMeansExists.exists(true));
    }
}
