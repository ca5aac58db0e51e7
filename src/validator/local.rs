/// Printable ASCII allowed in an unquoted atom besides letters and digits.
const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(c)
}

/// Dot-atom: one or more non-empty atoms separated by single dots.
pub(crate) fn is_local_strict(local: &str) -> bool {
    local
        .split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

/// Dot-atom, or a quoted string whose content is printable ASCII or space.
/// Inside quotes `\` escapes the next character; an unescaped `"`, CR or LF
/// ends validity.
pub(crate) fn is_local_relaxed(local: &str) -> bool {
    match local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(content) => is_quoted_content(content),
        None => is_local_strict(local),
    }
}

fn is_quoted_content(content: &str) -> bool {
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match chars.next() {
                Some(escaped) => escaped,
                None => return false,
            }
        } else if c == '"' {
            return false;
        } else {
            c
        };
        if !(c == ' ' || c == '\t' || c.is_ascii_graphic()) {
            return false;
        }
    }
    true
}
