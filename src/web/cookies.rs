use std::sync::LazyLock;

use regex::Regex;

/// `name=value;` up to the first attribute of a `Set-Cookie` header.
static SET_COOKIE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Set-Cookie:\s*(.*?;)").expect("Set-Cookie pattern is valid")
});

/// Raw `name=value;` fragments in the order the headers arrived.
///
/// Fragments are neither parsed further nor deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    fragments: Vec<String>,
}

impl CookieJar {
    pub fn from_headers(headers: &[(String, String)]) -> Self {
        let fragments = headers
            .iter()
            .filter_map(|(name, value)| {
                let line = format!("{name}: {value}");
                SET_COOKIE
                    .captures(&line)
                    .and_then(|caps| caps.get(1))
                    .map(|fragment| fragment.as_str().to_string())
            })
            .collect();
        Self { fragments }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Value for `Cookie:` request headers.
    pub fn header_value(&self) -> String {
        self.fragments.join(" ")
    }

    /// Text after the first `=` of the first fragment named `name`, verbatim
    /// (including the trailing `;`).
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.fragments
            .iter()
            .filter_map(|fragment| fragment.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn extracts_fragments_in_header_order() {
        let jar = CookieJar::from_headers(&headers(&[
            ("content-type", "text/html"),
            ("set-cookie", "B=abc123; expires=Thu, 01 Jan 2099 00:00:00 GMT; path=/"),
            ("Set-Cookie", "AS=v=1&s=xyz; domain=.yahoo.com; secure"),
            ("set-cookie", "B=again; path=/"),
        ]));
        assert_eq!(jar.fragments(), ["B=abc123;", "AS=v=1&s=xyz;", "B=again;"]);
        assert_eq!(jar.header_value(), "B=abc123; AS=v=1&s=xyz; B=again;");
    }

    #[test]
    fn cookie_without_attributes_is_skipped() {
        let jar = CookieJar::from_headers(&headers(&[("set-cookie", "bare=value")]));
        assert!(jar.is_empty());
    }

    #[test]
    fn value_of_returns_first_match_verbatim() {
        let jar = CookieJar::from_headers(&headers(&[
            ("set-cookie", "MSPRequ=id=N&lt=1; path=/"),
            ("set-cookie", "uaid=4f2c9e; secure"),
            ("set-cookie", "uaid=second; secure"),
        ]));
        assert_eq!(jar.value_of("uaid"), Some("4f2c9e;"));
        assert_eq!(jar.value_of("MSPRequ"), Some("id=N&lt=1;"));
        assert_eq!(jar.value_of("missing"), None);
    }
}
