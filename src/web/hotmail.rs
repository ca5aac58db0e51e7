use serde::Serialize;
use serde_json::Value;

use crate::verify::{HotmailPolarity, Probe, ProbeOutcome, Strategy, VerifyContext, VerifyError};

use super::HttpClient;
use super::page::{ACCEPT_LANGUAGE, USER_AGENT, abort, decode_json, fetch_page, submit};

pub(crate) const SIGNIN_PAGE_URL: &str = "https://login.live.com/";
pub(crate) const USERNAME_CHECK_URL: &str =
    "https://login.live.com/GetCredentialType.srf?wa=wsignin1.0";
const ORIGIN: &str = "https://login.live.com";

#[derive(Debug, Serialize)]
struct CredentialTypeRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    uaid: Option<&'a str>,
    username: String,
}

/// Asks the Microsoft sign-in flow which credential type the candidate has.
///
/// The sign-in page is fetched twice: the second request carries the first
/// cookie set back, which is when the `uaid` cookie needed by the
/// credential-type endpoint is issued.
pub struct HotmailProbe<'a, H: ?Sized> {
    http: &'a H,
    polarity: HotmailPolarity,
}

impl<'a, H: HttpClient + ?Sized> HotmailProbe<'a, H> {
    pub fn new(http: &'a H, polarity: HotmailPolarity) -> Self {
        Self { http, polarity }
    }
}

impl<H: HttpClient + ?Sized> Probe for HotmailProbe<'_, H> {
    fn probe(&self, ctx: &mut VerifyContext<'_>) -> Result<ProbeOutcome, VerifyError> {
        const STRATEGY: Strategy = Strategy::HotmailWeb;

        ctx.log("Validating a Hotmail email address...");
        ctx.log("Getting the sign-in page content...");
        let first = match fetch_page(self.http, SIGNIN_PAGE_URL, None, ctx) {
            Ok(page) => page,
            Err(err) => return Ok(abort(STRATEGY, err, ctx)),
        };

        ctx.log("Sending another request to get the needed cookies for validation...");
        let second = match fetch_page(self.http, SIGNIN_PAGE_URL, Some(&first.cookies), ctx) {
            Ok(page) => page,
            Err(err) => return Ok(abort(STRATEGY, err, ctx)),
        };

        ctx.log("Preparing fields...");
        let uaid = second.cookies.value_of("uaid");
        if uaid.is_none() {
            ctx.log("No uaid cookie was issued.");
        }
        let payload = CredentialTypeRequest {
            uaid,
            username: ctx.request().candidate_email().to_lowercase(),
        };
        let body =
            serde_json::to_string(&payload).map_err(|err| VerifyError::encode(STRATEGY, err))?;

        let cookie = second.cookies.header_value();
        let headers = [
            ("Origin", ORIGIN),
            ("hpgid", "33"),
            ("User-Agent", USER_AGENT),
            ("Content-Type", "application/json; charset=UTF-8"),
            ("Accept", "application/json"),
            ("Referer", ORIGIN),
            ("Accept-Language", ACCEPT_LANGUAGE),
            ("Cookie", cookie.as_str()),
        ];
        let response = match submit(self.http, USERNAME_CHECK_URL, &headers, body, ctx) {
            Ok(response) => response,
            Err(err) => return Ok(abort(STRATEGY, err, ctx)),
        };

        ctx.log("Searching username error...");
        let json = decode_json(STRATEGY, &response, ctx)?;
        Ok(interpret(&json, self.polarity, ctx))
    }
}

fn interpret(json: &Value, polarity: HotmailPolarity, ctx: &mut VerifyContext<'_>) -> ProbeOutcome {
    let Some(object) = json.as_object() else {
        ctx.log("Response is not a JSON object.");
        return ProbeOutcome::ProtocolAnomaly("response is not a JSON object".to_string());
    };

    let flag = object.get("IfExistsResult");
    match flag {
        Some(value) => ctx.log(format!("IfExistsResult is {value}.")),
        None => ctx.log("IfExistsResult is absent."),
    }
    let exists = polarity.exists(flag.is_some_and(is_truthy));
    ctx.log(format!(
        "Mapped with {polarity:?} polarity: the account {}.",
        if exists { "exists" } else { "does not exist" }
    ));
    ProbeOutcome::Verified(exists)
}

/// Null, `false`, zero, `""`, `"0"` and empty containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
