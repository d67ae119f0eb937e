//! Plain-text normalisation for free-text fields.

/// Entities the ERP's rich-text editor produces.
const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&apos;", '\''),
    ("&nbsp;", ' '),
];

/// Strip markup tags from `input` and decode common entities.
///
/// Line-breaking tags (`<br>`, `</p>`, `</div>`, `</li>`) become newlines so
/// paragraphs stay apart. Returns `None` when nothing but whitespace is left.
pub fn strip_markup(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => {
                let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
                if is_line_break(&tag) {
                    out.push('\n');
                }
                rest = &rest[start + end + 1..];
            }
            None => {
                // unterminated tag: keep the text as is
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    let decoded = decode_entities(&out);
    let lines: Vec<&str> = decoded
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn is_line_break(tag: &str) -> bool {
    let name = tag.trim_end_matches('/').trim();
    matches!(name, "br" | "/p" | "/div" | "/li")
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    'outer: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        for (entity, ch) in ENTITIES {
            if tail.starts_with(entity) {
                out.push(*ch);
                rest = &tail[entity.len()..];
                continue 'outer;
            }
        }
        out.push('&');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}
