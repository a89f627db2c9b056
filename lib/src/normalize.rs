//! Repairs known escaping defects of some triple store dumps before a block is parsed.
//!
//! Two rewrites are applied to the whole block text:
//! - `\'` is unescaped to `'` (not a valid N-Triples escape);
//! - spaces inside `<...>` IRIs are percent-encoded as `%20`, but only when a closing `>`
//!   follows on the same line and never inside a quoted literal.

use std::borrow::Cow;

pub fn normalize_block(block: &str) -> Cow<'_, str> {
    let unescaped: Cow<'_, str> = if block.contains("\\'") {
        Cow::Owned(block.replace("\\'", "'"))
    } else {
        Cow::Borrowed(block)
    };

    if !unescaped.contains(' ') || !unescaped.contains('<') {
        return unescaped;
    }
    let mut out = String::with_capacity(unescaped.len() + 16);
    for (i, line) in unescaped.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        encode_iri_spaces(line, &mut out);
    }
    if out == *unescaped {
        unescaped
    } else {
        Cow::Owned(out)
    }
}

fn encode_iri_spaces(line: &str, out: &mut String) {
    let mut in_literal = false;
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if in_literal {
            match c {
                '\\' => {
                    // keep the escape and the escaped character together
                    let len = rest[1..].chars().next().map_or(1, |n| 1 + n.len_utf8());
                    out.push_str(&rest[..len]);
                    rest = &rest[len..];
                    continue;
                }
                '"' => in_literal = false,
                _ => {}
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }
        match c {
            '"' => {
                in_literal = true;
                out.push(c);
                rest = &rest[1..];
            }
            '<' => match rest.find('>') {
                Some(end) => {
                    out.push_str(&rest[..=end].replace(' ', "%20"));
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push_str(rest);
                    rest = "";
                }
            },
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
}
