use serde_json::Value;

use crate::verify::{Probe, ProbeOutcome, Strategy, VerifyContext, VerifyError};

use super::page::{ACCEPT_LANGUAGE, USER_AGENT, abort, decode_json, fetch_page, submit};
use super::{FieldSet, HttpClient};

pub(crate) const SIGNUP_PAGE_URL: &str = "https://login.yahoo.com/account/create\
    ?specId=yidReg&lang=en-US&src=&done=https%3A%2F%2Fwww.yahoo.com&display=login";
pub(crate) const VALIDATE_URL: &str =
    "https://login.yahoo.com/account/module/create?validateField=yid";
const ORIGIN: &str = "https://login.yahoo.com";

/// Asks the Yahoo sign-up form whether the candidate's identifier is taken.
pub struct YahooProbe<'a, H: ?Sized> {
    http: &'a H,
}

impl<'a, H: HttpClient + ?Sized> YahooProbe<'a, H> {
    pub fn new(http: &'a H) -> Self {
        Self { http }
    }
}

impl<H: HttpClient + ?Sized> Probe for YahooProbe<'_, H> {
    fn probe(&self, ctx: &mut VerifyContext<'_>) -> Result<ProbeOutcome, VerifyError> {
        const STRATEGY: Strategy = Strategy::YahooWeb;

        ctx.log("Validating a Yahoo email address...");
        ctx.log("Getting the sign-up page content...");
        let page = match fetch_page(self.http, SIGNUP_PAGE_URL, None, ctx) {
            Ok(page) => page,
            Err(err) => return Ok(abort(STRATEGY, err, ctx)),
        };

        ctx.log("Parsing the page for input fields...");
        let mut fields = FieldSet::from_html(&page.body);
        ctx.log(format!("Extracted {} fields.", fields.len()));

        let yid = ctx
            .request()
            .candidate_email()
            .to_lowercase()
            .replace("@yahoo.com", "");
        ctx.log(format!("Adding `{yid}` to the fields as yid..."));
        fields.insert("yid", yid);
        let body = fields
            .to_form()
            .map_err(|err| VerifyError::encode(STRATEGY, err))?;

        let cookie = page.cookies.header_value();
        let headers = [
            ("Origin", ORIGIN),
            ("X-Requested-With", "XMLHttpRequest"),
            ("User-Agent", USER_AGENT),
            (
                "Content-Type",
                "application/x-www-form-urlencoded; charset=UTF-8",
            ),
            ("Accept", "*/*"),
            ("Referer", SIGNUP_PAGE_URL),
            ("Accept-Language", ACCEPT_LANGUAGE),
            ("Cookie", cookie.as_str()),
        ];
        let response = match submit(self.http, VALIDATE_URL, &headers, body, ctx) {
            Ok(response) => response,
            Err(err) => return Ok(abort(STRATEGY, err, ctx)),
        };

        let json = decode_json(STRATEGY, &response, ctx)?;
        Ok(interpret(&json, ctx))
    }
}

/// `errors` must be a list; an entry `{name: "yid", error: "IDENTIFIER_EXISTS"}`
/// means the identifier is registered.
fn interpret(json: &Value, ctx: &mut VerifyContext<'_>) -> ProbeOutcome {
    let Some(errors) = json.get("errors").and_then(Value::as_array) else {
        ctx.log("Response has no errors list.");
        return ProbeOutcome::ProtocolAnomaly("response has no `errors` list".to_string());
    };

    ctx.log("Searching errors for existing username error...");
    let exists = errors.iter().any(|err| {
        err.get("name").and_then(Value::as_str) == Some("yid")
            && err.get("error").and_then(Value::as_str) == Some("IDENTIFIER_EXISTS")
    });
    if exists {
        ctx.log("Found an error about existing email.");
    } else {
        ctx.log("No existing-identifier error in the response.");
    }
    ProbeOutcome::Verified(exists)
}
