use std::fmt;
use std::net::IpAddr;

use thiserror::Error;

use crate::mx::Error as MxError;

/// Step of the dialogue an I/O failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpStage {
    Greeting,
    Helo,
    MailFrom,
    RcptTo,
    Quit,
}

impl fmt::Display for SmtpStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Greeting => "greeting",
            Self::Helo => "HELO",
            Self::MailFrom => "MAIL FROM",
            Self::RcptTo => "RCPT TO",
            Self::Quit => "QUIT",
        })
    }
}

#[derive(Debug, Error)]
pub enum SmtpProbeError {
    #[error("mail host resolution failed: {0}")]
    Resolution(#[from] MxError),
    #[error("connection to {host} at {address}:{port} failed: {source}")]
    Connect {
        host: String,
        address: IpAddr,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} failed: {source}")]
    Io {
        stage: SmtpStage,
        #[source]
        source: std::io::Error,
    },
}

impl SmtpProbeError {
    pub(crate) fn io(stage: SmtpStage) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { stage, source }
    }
}
