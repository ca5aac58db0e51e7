//! Syntax gate applied to every address before any network activity.

mod domain;
mod local;
mod types;

pub use types::{ValidationMode, ValidationReport};

use domain::check_domain;
use local::{is_local_relaxed, is_local_strict};

/// Leading or trailing whitespace is a failure, not something to trim.
pub fn validate_email(email: &str, mode: ValidationMode) -> ValidationReport {
    let mut reasons = Vec::new();

    let input = email.trim();
    if input.len() != email.len() {
        reasons.push("leading or trailing whitespace".to_string());
    }

    if input.len() > 254 {
        reasons.push(format!("total length {} > 254", input.len()));
    }

    let parts: Vec<&str> = input.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return ValidationReport { ok: false, reasons };
    }
    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > 64 {
        reasons.push(format!(
            "local part length {} invalid (1..=64)",
            local.len()
        ));
    }

    if domain.is_empty() {
        reasons.push("domain is empty".to_string());
    } else {
        check_domain(domain, &mut reasons);
    }

    let local_ok = match mode {
        ValidationMode::Strict => is_local_strict(local),
        ValidationMode::Relaxed => is_local_relaxed(local),
    };
    if !local_ok {
        reasons.push(match mode {
            ValidationMode::Strict => "invalid local part (strict rules)".into(),
            ValidationMode::Relaxed => "invalid local part (relaxed rules)".into(),
        });
    }

    let ok = reasons.is_empty();
    ValidationReport { ok, reasons }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn accepts_basic() {
        let r = validate_email("alice@example.com", ValidationMode::Strict);
        assert!(r.ok, "{:?}", r.reasons);
    }

    #[test]
    fn rejects_double_at() {
        let r = validate_email("a@@b", ValidationMode::Strict);
        assert!(!r.ok);
    }

    #[test]
    fn rejects_empty_domain() {
        let r = validate_email("alice@", ValidationMode::Strict);
        assert!(!r.ok);
        assert!(r.reasons.iter().any(|reason| reason == "domain is empty"));
    }

    #[test]
    fn accepts_ip_literal_domain() {
        let r = validate_email("postmaster@[192.0.2.1]", ValidationMode::Strict);
        assert!(r.ok, "{:?}", r.reasons);
    }

    #[test]
    fn uppercase_provider_domain_is_valid() {
        let r = validate_email("USER@YAHOO.COM", ValidationMode::Strict);
        assert!(r.ok, "{:?}", r.reasons);
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        for email in [" user@example.com", "user@example.com\n", "\tuser@example.com "] {
            let r = validate_email(email, ValidationMode::Relaxed);
            assert!(!r.ok, "{email:?}");
            assert_eq!(r.reasons, ["leading or trailing whitespace"], "{email:?}");
        }
    }

    #[test]
    fn relaxed_mode_allows_quoted_local() {
        assert!(!validate_email("\"john doe\"@example.com", ValidationMode::Strict).ok);
        assert!(validate_email("\"john doe\"@example.com", ValidationMode::Relaxed).ok);
    }
}
