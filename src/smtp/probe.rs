use std::io::{Read, Write};

use crate::mx::{LookupMx, resolve_host_address, resolve_mail_host};
use crate::verify::{Probe, ProbeOutcome, VerifyContext, VerifyError, VerifyOptions};

use super::connector::Connector;
use super::error::{SmtpProbeError, SmtpStage};
use super::session::SmtpSession;

/// Generic mail-transport probe: resolve the mail host, then run
/// `HELO`/`MAIL FROM`/`RCPT TO`/`QUIT` and look at the replies.
///
/// Single shot, no retries. Any resolution, connect or I/O failure becomes
/// [`ProbeOutcome::TransportFailure`].
pub struct SmtpProbe<'a, R: ?Sized, C> {
    resolver: &'a R,
    connector: &'a C,
    options: &'a VerifyOptions,
}

/// What the dialogue produced before `QUIT`.
enum Handshake {
    Replies { mail_from: String, rcpt_to: String },
    UnexpectedGreeting(String),
}

impl<'a, R, C> SmtpProbe<'a, R, C>
where
    R: LookupMx + ?Sized,
    C: Connector,
{
    pub fn new(resolver: &'a R, connector: &'a C, options: &'a VerifyOptions) -> Self {
        Self {
            resolver,
            connector,
            options,
        }
    }

    fn run(&self, ctx: &mut VerifyContext<'_>) -> Result<ProbeOutcome, SmtpProbeError> {
        let request = ctx.request();

        ctx.log("Finding MX record...");
        let host = match resolve_mail_host(self.resolver, request.candidate_domain()) {
            Ok(host) => host,
            Err(err) => {
                ctx.log("No MX record was found.");
                return Err(err.into());
            }
        };
        ctx.log(format!("Found mail host: {host}"));

        let address = match resolve_host_address(self.resolver, &host) {
            Ok(address) => address,
            Err(err) => {
                ctx.log(format!("Could not resolve the address of {}.", host.host));
                return Err(err.into());
            }
        };

        let port = self.options.smtp_port;
        ctx.log(format!("Connecting to {address}:{port}..."));
        let stream = self
            .connector
            .connect(
                &address.to_string(),
                port,
                self.options.connect_timeout,
                self.options.command_timeout,
            )
            .map_err(|source| SmtpProbeError::Connect {
                host: host.host.clone(),
                address,
                port,
                source,
            })?;
        ctx.log("Connection to server was successful.");

        let mut session = SmtpSession::new(stream);
        let handshake = self.converse(&mut session, ctx);

        ctx.log("Sending QUIT...");
        match session.quit() {
            Ok(()) => ctx.log("QUIT sent."),
            Err(err) => ctx.log(format!(
                "QUIT could not be sent: {}",
                SmtpProbeError::io(SmtpStage::Quit)(err)
            )),
        }
        drop(session);
        ctx.log("Connection closed.");

        match handshake? {
            Handshake::UnexpectedGreeting(greeting) => {
                Ok(ProbeOutcome::ProtocolAnomaly(format!("unexpected greeting: {greeting}")))
            }
            Handshake::Replies { mail_from, rcpt_to } => {
                ctx.log("Looking for 250 responses to MAIL FROM and RCPT TO...");
                if mail_from.starts_with("250") && rcpt_to.starts_with("250") {
                    ctx.log("Found! Both commands were accepted, the mailbox exists.");
                    Ok(ProbeOutcome::Verified(true))
                } else {
                    ctx.log("Not found! The mailbox is reported as invalid.");
                    Ok(ProbeOutcome::Verified(false))
                }
            }
        }
    }

    fn converse<S: Read + Write>(
        &self,
        session: &mut SmtpSession<S>,
        ctx: &mut VerifyContext<'_>,
    ) -> Result<Handshake, SmtpProbeError> {
        let request = ctx.request();

        ctx.log("Starting verification, waiting for the greeting...");
        let greeting = session
            .read_line()
            .map_err(SmtpProbeError::io(SmtpStage::Greeting))?;
        ctx.log(format!("Greeting: {greeting}"));
        if !greeting.starts_with("220") {
            ctx.log(format!("Encountered an unknown response code: {greeting}"));
            return Ok(Handshake::UnexpectedGreeting(greeting));
        }

        // HELO, not EHLO: every reply is read as a single line.
        let helo = format!(
            "HELO {}",
            self.options.helo_domain(request.verifier_domain())
        );
        exchange(session, ctx, SmtpStage::Helo, &helo)?;

        let mail_from = format!("MAIL FROM: <{}>", request.verifier_email());
        let mail_from = exchange(session, ctx, SmtpStage::MailFrom, &mail_from)?;

        let rcpt_to = format!("RCPT TO: <{}>", request.candidate_email());
        let rcpt_to = exchange(session, ctx, SmtpStage::RcptTo, &rcpt_to)?;

        Ok(Handshake::Replies { mail_from, rcpt_to })
    }
}

fn exchange<S: Read + Write>(
    session: &mut SmtpSession<S>,
    ctx: &mut VerifyContext<'_>,
    stage: SmtpStage,
    command: &str,
) -> Result<String, SmtpProbeError> {
    ctx.log(format!("Sending {command}"));
    let reply = session
        .command(command)
        .map_err(SmtpProbeError::io(stage))?;
    ctx.log(format!("Response: {reply}"));
    Ok(reply)
}

impl<R, C> Probe for SmtpProbe<'_, R, C>
where
    R: LookupMx + ?Sized,
    C: Connector,
{
    fn probe(&self, ctx: &mut VerifyContext<'_>) -> Result<ProbeOutcome, VerifyError> {
        match self.run(ctx) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                tracing::warn!(
                    target: "mailverify::smtp",
                    candidate = ctx.request().candidate_email(),
                    "SMTP probe aborted: {err}"
                );
                ctx.log(format!("SMTP probe aborted: {err}"));
                Ok(ProbeOutcome::TransportFailure(err.to_string()))
            }
        }
    }
}
