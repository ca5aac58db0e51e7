//! Steps shared by the provider probes: fetch a page and harvest its
//! cookies, submit a validation request, decode the JSON answer.

use serde_json::Value;

use crate::verify::{ProbeOutcome, Strategy, VerifyContext, VerifyError};

use super::{CookieJar, HttpClient, WebProbeError};

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36";
pub(crate) const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.8,ar;q=0.6";

pub(crate) struct Page {
    pub body: String,
    pub cookies: CookieJar,
}

/// GET `url`, sending `cookies` back when there are any.
pub(crate) fn fetch_page<H: HttpClient + ?Sized>(
    http: &H,
    url: &str,
    cookies: Option<&CookieJar>,
    ctx: &mut VerifyContext<'_>,
) -> Result<Page, WebProbeError> {
    let cookie_header;
    let mut headers = Vec::new();
    if let Some(jar) = cookies.filter(|jar| !jar.is_empty()) {
        cookie_header = jar.header_value();
        headers.push(("Accept-Language", "en"));
        headers.push(("Cookie", cookie_header.as_str()));
    }

    let response = http.get(url, &headers)?;
    if !response.is_success() {
        ctx.log(format!("Could not read the page (HTTP {}).", response.status));
        return Err(WebProbeError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    if response.body.is_empty() {
        ctx.log("Could not read the page.");
        return Err(WebProbeError::EmptyPage {
            url: url.to_string(),
        });
    }
    ctx.log("Page content stored.");

    ctx.log("Extracting cookies from headers...");
    let cookies = CookieJar::from_headers(&response.headers);
    if cookies.is_empty() {
        ctx.log("Could not find any cookies.");
    } else {
        ctx.log(format!("Cookies found: {}", cookies.header_value()));
    }

    Ok(Page {
        body: response.body,
        cookies,
    })
}

/// POST the validation request and return the raw response body.
pub(crate) fn submit<H: HttpClient + ?Sized>(
    http: &H,
    url: &str,
    headers: &[(&str, &str)],
    body: String,
    ctx: &mut VerifyContext<'_>,
) -> Result<String, WebProbeError> {
    ctx.log("Ready to submit the POST request to validate the email.");
    let response = http.post(url, headers, body)?;
    if !response.is_success() {
        ctx.log(format!("Validation request failed (HTTP {}).", response.status));
        return Err(WebProbeError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

pub(crate) fn decode_json(
    strategy: Strategy,
    body: &str,
    ctx: &mut VerifyContext<'_>,
) -> Result<Value, VerifyError> {
    ctx.log("Parsing the response...");
    serde_json::from_str(body).map_err(|err| {
        ctx.log(format!("Response is not valid JSON: {err}"));
        VerifyError::decode(strategy, err)
    })
}

/// Log a transport-level abort and turn it into an outcome.
pub(crate) fn abort(
    strategy: Strategy,
    err: WebProbeError,
    ctx: &mut VerifyContext<'_>,
) -> ProbeOutcome {
    tracing::warn!(
        target: "mailverify::web",
        candidate = ctx.request().candidate_email(),
        "{strategy} probe aborted: {err}"
    );
    ctx.log(format!("{strategy} probe aborted: {err}"));
    ProbeOutcome::TransportFailure(err.to_string())
}
