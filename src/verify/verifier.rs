use trust_dns_resolver::Resolver;

use crate::mx::{LookupMx, build_resolver};
use crate::smtp::{Connector, SmtpProbe, TcpConnector};
use crate::validator::validate_email;
use crate::web::{HotmailProbe, HttpClient, ReqwestClient, YahooProbe};

use super::{
    Probe, ProbeOutcome, Strategy, VerificationRequest, VerificationResult, VerifyContext,
    VerifyError, VerifyOptions, classify,
};

/// Verifier wired to the system DNS configuration, plain TCP and `reqwest`.
pub type SystemVerifier = Verifier<Resolver, TcpConnector, ReqwestClient>;

/// Picks a strategy for the candidate's domain and runs the matching probe.
///
/// Holds only collaborators and options. Every call builds its own
/// [`VerifyContext`], so a shared `&Verifier` can serve concurrent calls as
/// long as the collaborators allow it.
#[derive(Debug)]
pub struct Verifier<R, C, H> {
    resolver: R,
    connector: C,
    http: H,
    options: VerifyOptions,
}

impl SystemVerifier {
    pub fn from_system(options: VerifyOptions) -> Result<Self, VerifyError> {
        let resolver = build_resolver(options.dns_timeout)?;
        let http = ReqwestClient::new(options.http_timeout)
            .map_err(|source| VerifyError::HttpInit { source })?;
        Ok(Self::new(resolver, TcpConnector, http, options))
    }
}

impl<R, C, H> Verifier<R, C, H>
where
    R: LookupMx,
    C: Connector,
    H: HttpClient,
{
    pub fn new(resolver: R, connector: C, http: H, options: VerifyOptions) -> Self {
        Self {
            resolver,
            connector,
            http,
            options,
        }
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Decide whether `candidate` is likely to exist, probing as `verifier`.
    ///
    /// Ordinary failures (invalid syntax, DNS, network, unexpected replies)
    /// end in `exists = false` with the reason in the trace. Only an
    /// undecodable provider response is returned as `Err`.
    pub fn verify(
        &self,
        candidate: &str,
        verifier: &str,
    ) -> Result<VerificationResult, VerifyError> {
        let request = VerificationRequest::new(candidate, verifier);
        let mut ctx = VerifyContext::new(&request);

        ctx.log(format!(
            "Verifying {} as {}...",
            request.candidate_email(),
            request.verifier_email()
        ));
        if !self.inputs_valid(&mut ctx) {
            ctx.log("Verdict: mailbox does not exist");
            tracing::info!(
                target: "mailverify::verify",
                candidate = request.candidate_email(),
                "rejected before any network activity"
            );
            return Ok(VerificationResult {
                exists: false,
                strategy: None,
                trace: ctx.into_trace(),
            });
        }

        let strategy = match classify(request.candidate_email()) {
            Ok(strategy) => strategy,
            Err(err) => {
                ctx.log(format!("Could not classify the address: {err}"));
                ctx.log("Verdict: mailbox does not exist");
                return Ok(VerificationResult {
                    exists: false,
                    strategy: None,
                    trace: ctx.into_trace(),
                });
            }
        };
        ctx.log(format!("Strategy: {strategy}"));

        let outcome = match self.run(strategy, &mut ctx) {
            Ok(outcome) => outcome,
            Err(err) => {
                ctx.log(format!("Probe failed: {err}"));
                tracing::error!(
                    target: "mailverify::verify",
                    candidate = request.candidate_email(),
                    %strategy,
                    "{err}"
                );
                return Err(err.with_trace(ctx.into_trace()));
            }
        };

        ctx.log(format!("Outcome: {outcome}"));
        let exists = outcome.exists();
        ctx.log(if exists {
            "Verdict: mailbox exists"
        } else {
            "Verdict: mailbox does not exist"
        });
        tracing::info!(
            target: "mailverify::verify",
            candidate = request.candidate_email(),
            %strategy,
            conclusive = outcome.is_conclusive(),
            exists,
            "verification finished"
        );

        Ok(VerificationResult {
            exists,
            strategy: Some(strategy),
            trace: ctx.into_trace(),
        })
    }

    fn inputs_valid(&self, ctx: &mut VerifyContext<'_>) -> bool {
        let request = ctx.request();
        let mut valid = true;
        for (role, email) in [
            ("Candidate", request.candidate_email()),
            ("Verifier", request.verifier_email()),
        ] {
            let report = validate_email(email, self.options.validation_mode);
            if !report.ok {
                ctx.log(format!(
                    "{role} address `{email}` is invalid: {}",
                    report.reasons.join("; ")
                ));
                valid = false;
            }
        }
        valid
    }

    fn run(
        &self,
        strategy: Strategy,
        ctx: &mut VerifyContext<'_>,
    ) -> Result<ProbeOutcome, VerifyError> {
        match strategy {
            Strategy::GenericSmtp => {
                SmtpProbe::new(&self.resolver, &self.connector, &self.options).probe(ctx)
            }
            Strategy::YahooWeb => YahooProbe::new(&self.http).probe(ctx),
            Strategy::HotmailWeb => {
                HotmailProbe::new(&self.http, self.options.hotmail_polarity).probe(ctx)
            }
        }
    }
}

/// One-shot verification with default options and system collaborators.
pub fn verify(candidate: &str, verifier: &str) -> Result<VerificationResult, VerifyError> {
    SystemVerifier::from_system(VerifyOptions::default())?.verify(candidate, verifier)
}
