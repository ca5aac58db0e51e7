use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use mailverify_lib::{HotmailPolarity, ValidationMode, VerifyOptions};

#[derive(Parser)]
#[command(name = "mailverify-cli", version, about)]
pub struct Cli {
    /// adresse e-mail à vérifier
    pub email: String,

    /// adresse utilisée pour MAIL FROM (et HELO par défaut)
    #[arg(long = "from")]
    pub verifier: String,

    /// format: human|json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// mode: strict|relaxed
    #[arg(long, default_value = "strict")]
    pub mode: String,

    /// port SMTP
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// timeout connexion / commande SMTP / HTTP (ms)
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// nom annoncé dans HELO (défaut: domaine de --from)
    #[arg(long)]
    pub helo: Option<String>,

    /// interprétation de IfExistsResult: observed|truthy
    #[arg(long, default_value = "observed")]
    pub hotmail_polarity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

impl Cli {
    pub fn output_format(&self) -> Result<Format> {
        match self.format.as_str() {
            "human" => Ok(Format::Human),
            "json" => Ok(Format::Json),
            other => bail!("format inconnu '{other}', utilisez human|json"),
        }
    }

    pub fn verify_options(&self) -> Result<VerifyOptions> {
        let mut options = VerifyOptions {
            validation_mode: mode_from_str(&self.mode)?,
            smtp_port: self.port,
            helo_domain: self.helo.clone(),
            hotmail_polarity: polarity_from_str(&self.hotmail_polarity)?,
            ..VerifyOptions::default()
        };
        if let Some(ms) = self.timeout_ms {
            let timeout = Duration::from_millis(ms);
            options.connect_timeout = timeout;
            options.command_timeout = timeout;
            options.http_timeout = timeout;
        }
        Ok(options)
    }
}

fn mode_from_str(s: &str) -> Result<ValidationMode> {
    match s {
        "strict" => Ok(ValidationMode::Strict),
        "relaxed" => Ok(ValidationMode::Relaxed),
        other => bail!("mode inconnu '{other}', utilisez strict|relaxed"),
    }
}

fn polarity_from_str(s: &str) -> Result<HotmailPolarity> {
    match s {
        "observed" => Ok(HotmailPolarity::Observed),
        "truthy" => Ok(HotmailPolarity::TruthyMeansExists),
        other => bail!("polarité inconnue '{other}', utilisez observed|truthy"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_applies_to_every_network_step() {
        let cli = Cli::parse_from([
            "mailverify-cli",
            "user@example.com",
            "--from",
            "probe@verifier.org",
            "--timeout",
            "2500",
            "--hotmail-polarity",
            "truthy",
        ]);
        let options = cli.verify_options().expect("options");
        assert_eq!(options.connect_timeout, Duration::from_millis(2500));
        assert_eq!(options.http_timeout, Duration::from_millis(2500));
        assert_eq!(options.dns_timeout, VerifyOptions::default().dns_timeout);
        assert_eq!(options.hotmail_polarity, HotmailPolarity::TruthyMeansExists);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let cli = Cli::parse_from([
            "mailverify-cli",
            "user@example.com",
            "--from",
            "probe@verifier.org",
            "--mode",
            "lenient",
        ]);
        assert!(cli.verify_options().is_err());
    }
}
