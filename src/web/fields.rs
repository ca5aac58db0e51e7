use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};

static INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("input selector is valid"));

/// Form field names mapped to their default values.
///
/// Later inputs overwrite earlier ones with the same name. Iteration is
/// ordered by name so encoded bodies are stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    /// Collect every named `<input>` of `html`. Inputs without a `value`
    /// attribute map to an empty string.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut fields = BTreeMap::new();
        for input in document.select(&INPUT) {
            let element = input.value();
            let Some(name) = element.attr("name") else {
                continue;
            };
            let value = element.attr("value").unwrap_or_default();
            fields.insert(name.to_string(), value.to_string());
        }
        Self(fields)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_form(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNUP: &str = r#"<!doctype html>
<html><body>
  <form id="regform">
    <input type="hidden" name="browser-fp-data" value="{&quot;language&quot;:&quot;en-US&quot;}">
    <input type="hidden" name="specId" value="yidReg">
    <input type="hidden" name="crumb" value="first">
    <input type="hidden" name="crumb" value="second">
    <input type="text" name="yid">
    <input type="submit" value="Continue">
  </form>
</body></html>"#;

    #[test]
    fn collects_named_inputs_last_wins() {
        let fields = FieldSet::from_html(SIGNUP);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields.get("specId"), Some("yidReg"));
        assert_eq!(fields.get("crumb"), Some("second"));
        assert_eq!(fields.get("yid"), Some(""));
        assert_eq!(
            fields.get("browser-fp-data"),
            Some(r#"{"language":"en-US"}"#)
        );
    }

    #[test]
    fn form_encoding_is_sorted_and_escaped() {
        let mut fields = FieldSet::default();
        fields.insert("yid", "john.doe");
        fields.insert("acrumb", "a b&c");
        assert_eq!(fields.to_form().expect("encode"), "acrumb=a+b%26c&yid=john.doe");
    }

    #[test]
    fn garbage_html_yields_no_fields() {
        assert!(FieldSet::from_html("not html at all <<<").is_empty());
    }
}
