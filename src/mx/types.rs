use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// How the mail host for a domain was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum HostSource {
    /// The domain was an IP address literal; no lookup was made.
    AddressLiteral,
    /// Preferred MX record.
    Mx { preference: u16 },
    /// No MX records; the domain's own A/AAAA record is used (implicit MX).
    Address,
}

/// The single host the SMTP prober connects to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MailHost {
    pub host: String,
    pub source: HostSource,
}

impl MailHost {
    pub(crate) fn literal(ip: IpAddr) -> Self {
        Self {
            host: ip.to_string(),
            source: HostSource::AddressLiteral,
        }
    }

    pub(crate) fn exchange(record: &MxRecord) -> Self {
        Self {
            host: record.exchange.clone(),
            source: HostSource::Mx {
                preference: record.preference,
            },
        }
    }

    pub(crate) fn address(ip: IpAddr) -> Self {
        Self {
            host: ip.to_string(),
            source: HostSource::Address,
        }
    }
}

impl fmt::Display for MailHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            HostSource::AddressLiteral => write!(f, "{} (address literal)", self.host),
            HostSource::Mx { preference } => write!(f, "{} (MX preference {preference})", self.host),
            HostSource::Address => write!(f, "{} (implicit MX)", self.host),
        }
    }
}
