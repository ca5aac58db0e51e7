use std::net::IpAddr;
use std::time::Duration;

use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    system_conf::read_system_conf,
};

use super::{Error, MailHost, MxRecord};

/// Build a synchronous resolver from the system configuration with a
/// per-query `timeout` and a single attempt.
pub fn build_resolver(timeout: Duration) -> Result<Resolver, Error> {
    let (config, mut opts) = read_system_conf().map_err(Error::resolver_init)?;
    opts.timeout = timeout;
    opts.attempts = 1;
    Resolver::new(config, opts).map_err(Error::resolver_init)
}

/// Resolve the host to open an SMTP connection to for `domain`.
///
/// Square brackets and an `IPv6:` tag are stripped first. An IP literal is
/// returned as is; otherwise the preferred MX exchange wins, and without MX
/// records the domain's own A (then AAAA) address is used.
pub fn resolve_mail_host<R>(resolver: &R, domain: &str) -> Result<MailHost, Error>
where
    R: LookupMx + ?Sized,
{
    let target = strip_address_literal(domain);
    if target.is_empty() {
        return Err(Error::EmptyDomain);
    }

    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(MailHost::literal(ip));
    }

    let records = resolver
        .lookup_mx(target)
        .map_err(|err| Error::lookup(target, err))?;
    if let Some(record) = select_preferred(&records) {
        return Ok(MailHost::exchange(record));
    }

    let addresses = resolver
        .lookup_ip(target)
        .map_err(|err| Error::lookup(target, err))?;
    prefer_ipv4(&addresses)
        .map(MailHost::address)
        .ok_or_else(|| Error::NoRecords {
            domain: target.to_string(),
        })
}

/// Address to open the SMTP connection to. Literal and implicit-MX hosts are
/// already addresses; an MX exchange name goes through `resolver`, so the
/// resolver's timeout also bounds this lookup.
pub fn resolve_host_address<R>(resolver: &R, host: &MailHost) -> Result<IpAddr, Error>
where
    R: LookupMx + ?Sized,
{
    if let Ok(ip) = host.host.parse::<IpAddr>() {
        return Ok(ip);
    }
    let addresses = resolver
        .lookup_ip(&host.host)
        .map_err(|err| Error::lookup(host.host.as_str(), err))?;
    prefer_ipv4(&addresses).ok_or_else(|| Error::NoAddress {
        host: host.host.clone(),
    })
}

fn prefer_ipv4(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
}

/// Lowest preference wins; on ties the first record seen is kept.
pub fn select_preferred(records: &[MxRecord]) -> Option<&MxRecord> {
    records.iter().min_by_key(|record| record.preference)
}

pub(crate) fn strip_address_literal(domain: &str) -> &str {
    let trimmed = domain.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);
    trimmed.strip_prefix("IPv6:").unwrap_or(trimmed)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

/// DNS operations needed to find a mail host. Implemented for the system
/// [`Resolver`]; tests provide stubs.
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
    fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) if is_no_records(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }

    fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError> {
        match Resolver::lookup_ip(self, domain) {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(err) if is_no_records(&err) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}

impl<T: LookupMx + ?Sized> LookupMx for &T {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (**self).lookup_mx(domain)
    }

    fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError> {
        (**self).lookup_ip(domain)
    }
}

fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
