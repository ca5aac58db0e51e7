use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use thiserror::Error;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Status, headers (in received order) and body of an HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("redirect failed: {0}")]
    Redirect(String),
}

/// Synchronous request/response cycles used by the web probes.
pub trait HttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpError>;

    fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<HttpResponse, HttpError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpError> {
        (**self).get(url, headers)
    }

    fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<HttpResponse, HttpError> {
        (**self).post(url, headers, body)
    }
}

/// [`HttpClient`] backed by a blocking `reqwest` client.
///
/// Redirects are followed here rather than by `reqwest`, so the returned
/// headers hold every hop's headers in order and `Set-Cookie` lines from 3xx
/// responses reach the probes. Cookies are not replayed between hops.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        let url = Url::parse(url)
            .map_err(|err| HttpError::Transport(format!("invalid URL `{url}`: {err}")))?;
        let first = Hop { method, url, body };
        follow_redirects(first, |hop| self.send_hop(hop, headers))
    }

    fn send_hop(&self, hop: &Hop, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpError> {
        let mut builder = match hop.method {
            Method::Get => self.client.get(hop.url.clone()),
            Method::Post => self
                .client
                .post(hop.url.clone())
                .body(hop.body.clone().unwrap_or_default()),
        };
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text()?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpError> {
        self.send(Method::Get, url, headers, None)
    }

    fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<HttpResponse, HttpError> {
        self.send(Method::Post, url, headers, Some(body))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

/// One request of a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hop {
    method: Method,
    url: Url,
    body: Option<String>,
}

/// Run `send` for `first` and for every redirect after it. The result has the
/// last hop's status and body and the headers of all hops, in order.
fn follow_redirects<F>(first: Hop, mut send: F) -> Result<HttpResponse, HttpError>
where
    F: FnMut(&Hop) -> Result<HttpResponse, HttpError>,
{
    let mut hop = first;
    let mut headers = Vec::new();
    for _ in 0..=MAX_REDIRECTS {
        let response = send(&hop)?;
        let next = next_hop(&hop, &response)?;
        headers.extend(response.headers);
        match next {
            Some(next) => hop = next,
            None => {
                return Ok(HttpResponse {
                    status: response.status,
                    headers,
                    body: response.body,
                });
            }
        }
    }
    Err(HttpError::Redirect(format!(
        "more than {MAX_REDIRECTS} redirects"
    )))
}

/// 301/302/303 continue as a bodiless GET; 307/308 repeat the request. A 3xx
/// without `Location` ends the chain.
fn next_hop(hop: &Hop, response: &HttpResponse) -> Result<Option<Hop>, HttpError> {
    if !matches!(response.status, 301 | 302 | 303 | 307 | 308) {
        return Ok(None);
    }
    let Some(location) = response.header("location") else {
        return Ok(None);
    };
    let url = hop
        .url
        .join(location)
        .map_err(|err| HttpError::Redirect(format!("invalid Location `{location}`: {err}")))?;
    let next = match response.status {
        307 | 308 => Hop {
            url,
            ..hop.clone()
        },
        _ => Hop {
            method: Method::Get,
            url,
            body: None,
        },
    };
    Ok(Some(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::CookieJar;

    fn response(status: u16, headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body: if status == 200 { "ok".into() } else { String::new() },
        }
    }

    fn hop(method: Method, url: &str, body: Option<&str>) -> Hop {
        Hop {
            method,
            url: Url::parse(url).expect("url"),
            body: body.map(str::to_string),
        }
    }

    /// Replays `script` in order and records every hop sent.
    fn scripted(
        first: Hop,
        script: Vec<HttpResponse>,
    ) -> (Result<HttpResponse, HttpError>, Vec<Hop>) {
        let mut script = script.into_iter();
        let mut sent = Vec::new();
        let result = follow_redirects(first, |hop| {
            sent.push(hop.clone());
            script
                .next()
                .ok_or_else(|| HttpError::Transport("script exhausted".into()))
        });
        (result, sent)
    }

    #[test]
    fn cookies_set_on_a_redirect_are_kept() {
        let (result, sent) = scripted(
            hop(Method::Get, "https://login.live.com/", None),
            vec![
                response(
                    302,
                    &[("set-cookie", "uaid=hop1; path=/"), ("location", "/final?x=1")],
                ),
                response(200, &[("set-cookie", "MSPOK=final; path=/")]),
            ],
        );
        let response = result.expect("chain");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "ok");
        let jar = CookieJar::from_headers(&response.headers);
        assert_eq!(jar.fragments(), ["uaid=hop1;", "MSPOK=final;"]);
        assert_eq!(jar.value_of("uaid"), Some("hop1;"));
        assert_eq!(sent[1].url.as_str(), "https://login.live.com/final?x=1");
    }

    #[test]
    fn see_other_turns_post_into_get() {
        let (result, sent) = scripted(
            hop(Method::Post, "https://login.yahoo.com/validate", Some("yid=a")),
            vec![
                response(303, &[("Location", "https://login.yahoo.com/done")]),
                response(200, &[]),
            ],
        );
        result.expect("chain");
        assert_eq!(sent[1], hop(Method::Get, "https://login.yahoo.com/done", None));
    }

    #[test]
    fn temporary_redirect_repeats_the_post() {
        let (result, sent) = scripted(
            hop(Method::Post, "https://login.live.com/check", Some("{}")),
            vec![
                response(307, &[("location", "/check2")]),
                response(200, &[]),
            ],
        );
        result.expect("chain");
        assert_eq!(sent[1], hop(Method::Post, "https://login.live.com/check2", Some("{}")));
    }

    #[test]
    fn redirect_without_location_ends_the_chain() {
        let (result, sent) = scripted(
            hop(Method::Get, "https://login.live.com/", None),
            vec![response(302, &[("set-cookie", "a=b; path=/")])],
        );
        assert_eq!(result.expect("chain").status, 302);
        assert_eq!(sent.len(), 1);
    }

    #[test]
    fn endless_redirects_are_an_error() {
        let script = (0..=MAX_REDIRECTS)
            .map(|_| response(302, &[("location", "/again")]))
            .collect();
        let (result, sent) = scripted(hop(Method::Get, "https://loop.test/", None), script);
        assert!(matches!(result, Err(HttpError::Redirect(_))));
        assert_eq!(sent.len(), MAX_REDIRECTS + 1);
    }

    mod loopback {
        use super::*;
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;
        use std::thread;

        #[test]
        #[ignore = "requires loopback TCP binding"]
        fn reqwest_client_reports_every_hop() {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            let port = listener.local_addr().expect("addr").port();
            let server = thread::spawn(move || {
                let replies = [
                    "HTTP/1.1 302 Found\r\nSet-Cookie: uaid=hop1; path=/\r\n\
                     Location: /final\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    "HTTP/1.1 200 OK\r\nSet-Cookie: MSPOK=final; path=/\r\n\
                     Content-Length: 2\r\nConnection: close\r\n\r\nok",
                ];
                for reply in replies {
                    let (mut stream, _) = listener.accept().expect("accept");
                    let mut reader = BufReader::new(stream.try_clone().expect("clone"));
                    let mut line = String::new();
                    while reader.read_line(&mut line).expect("read") > 2 {
                        line.clear();
                    }
                    stream.write_all(reply.as_bytes()).expect("write");
                }
            });

            let client = ReqwestClient::new(Duration::from_secs(5)).expect("client");
            let response = client
                .get(&format!("http://127.0.0.1:{port}/"), &[])
                .expect("get");
            server.join().expect("server thread");

            assert_eq!(response.status, 200);
            let jar = CookieJar::from_headers(&response.headers);
            assert_eq!(jar.value_of("uaid"), Some("hop1;"));
            assert_eq!(jar.value_of("MSPOK"), Some("final;"));
        }
    }
}
