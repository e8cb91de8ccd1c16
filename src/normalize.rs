/// Strip the whitespace characters `' '`, `'\n'` and `'\r'` from a document
/// unless they sit inside `<...>` markup or a quoted value, and drop any
/// namespace prefix (`prefix:` right after `<` or `</`) from tag names along
/// the way.
///
/// The `/` of an end tag is always kept even though the prefix lookahead
/// inspects it. Operates on bytes; only whole ASCII characters are ever
/// removed, so multi-byte text content passes through untouched.
pub fn remove_whitespace(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut in_tag = false;
    let mut in_quotes = false;
    // Position of a '/' right after '<' (copied unconditionally) and of a
    // ':' terminating a namespace prefix (everything from the character
    // after '<' through the ':' is dropped).
    let mut slash_at: Option<usize> = None;
    let mut colon_at: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if slash_at == Some(i) {
            out.push(b);
            continue;
        }

        // Still inside a prefix being dropped.
        if let Some(colon) = colon_at {
            if colon >= i {
                continue;
            }
            colon_at = None;
        }

        // Tag and quote contents are copied verbatim.
        if in_quotes {
            out.push(b);
            if b == b'"' {
                in_quotes = false;
            }
            continue;
        }
        if in_tag {
            out.push(b);
            if b == b'>' {
                in_tag = false;
            }
            continue;
        }

        if b == b'"' {
            in_quotes = true;
        }

        if b == b'<' {
            in_tag = true;
            slash_at = None;
            // Look ahead to the end of the tag name for a prefix.
            for (j, &ahead) in bytes.iter().enumerate().skip(i + 1) {
                if ahead == b'>' || ahead == b' ' {
                    break;
                }
                if ahead == b'/' && j == i + 1 {
                    slash_at = Some(j);
                }
                if ahead == b':' {
                    colon_at = Some(j);
                    break;
                }
            }
        }

        if b != b' ' && b != b'\n' && b != b'\r' {
            out.push(b);
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}
