/// Context of the scan position inside a whitespace-normalized document.
/// Exactly one holds at any position; transitions are driven solely by the
/// characters `"`, `<` and `>`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Context {
    /// Between elements; the initial state.
    Outside,
    /// Inside a `"..."` quoted value.
    Quote,
    /// Inside `<...>` tag markup.
    Markup,
    /// Inside leaf text content.
    Leaf,
}

/// Locate the first index at or after `from` where `tag` occurs as genuine
/// markup, skipping occurrences of the same characters embedded in quoted
/// values or leaf text.
///
/// `xml` must already be whitespace-normalized: in the `Outside` state any
/// character other than `"` and `<` is taken to begin leaf data. For an
/// end-style tag (`</x>`) the returned index is the tag's start; callers add
/// the tag length themselves when they need the position after it.
///
/// Returns `None` when no such occurrence exists before end-of-buffer minus
/// the tag length.
pub fn scan_for_tag(xml: &str, tag: &str, from: usize) -> Option<usize> {
    let bytes = xml.as_bytes();
    let needle = tag.as_bytes();
    if needle.is_empty() || bytes.len() < needle.len() {
        return None;
    }
    let end_scan = bytes.len() - needle.len() + 1;
    let mut context = Context::Outside;

    let mut i = from;
    while i < end_scan {
        let b = bytes[i];
        match context {
            Context::Quote => {
                if b == b'"' {
                    context = Context::Outside;
                }
            }
            Context::Markup => {
                if b == b'>' {
                    context = Context::Outside;
                }
            }
            Context::Leaf => {
                // A '<' ends the leaf; this is where an end tag following
                // leaf text gets recognized.
                if b == b'<' {
                    context = Context::Markup;
                    if &bytes[i..i + needle.len()] == needle {
                        return Some(i);
                    }
                }
            }
            Context::Outside => {
                if &bytes[i..i + needle.len()] == needle {
                    return Some(i);
                }
                context = match b {
                    b'"' => Context::Quote,
                    b'<' => Context::Markup,
                    // Whitespace is already stripped, so anything else
                    // here is data.
                    _ => Context::Leaf,
                };
            }
        }
        i += 1;
    }

    None
}

/// Convert a start tag `<x>` into its end tag `</x>`.
pub fn make_end_tag(start_tag: &str) -> String {
    if start_tag.len() < 3 {
        return String::new();
    }
    format!("</{}", &start_tag[1..])
}
