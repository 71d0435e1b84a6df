//! Minimal tag scanning for provider HTML payloads. Rate pages are scraped
//! by position, so a tolerant element walk is all that is needed here.

/// Byte-wise ASCII case-insensitive substring search.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < from + needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Returns the inner markup of every `<tag ...>...</tag>` element, in
/// document order. Malformed or unclosed elements are skipped.
pub fn elements<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_ci(html, &open, pos) {
        let after_name = start + open.len();
        // Require a tag boundary so `<td` does not match `<tdata`.
        match html.as_bytes().get(after_name) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
            _ => {
                pos = after_name;
                continue;
            }
        }
        let Some(open_end) = html[after_name..].find('>') else {
            break;
        };
        let inner_start = after_name + open_end + 1;
        let Some(inner_end) = find_ci(html, &close, inner_start) else {
            pos = inner_start;
            continue;
        };
        found.push(&html[inner_start..inner_end]);
        pos = inner_end + close.len();
    }

    found
}

/// Concatenated text of a markup fragment with all tags removed.
pub fn text_content(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}
