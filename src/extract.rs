use crate::scan::{make_end_tag, scan_for_tag};

/// Result of a chunk or value extraction.
///
/// An absent start tag resolves silently to empty text downstream; a found
/// start tag with no matching end tag is an inconsistency worth a
/// diagnostic. Both collapse to `""` through [`Extracted::into_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Found(String),
    StartMissing,
    EndMissing,
}

impl Extracted {
    pub fn into_text(self) -> String {
        match self {
            Extracted::Found(text) => text,
            Extracted::StartMissing | Extracted::EndMissing => String::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }
}

/// Copy the chunk spanning from the beginning of `start_tag` through the end
/// of `end_tag`, inclusive. Either tag may itself be end-style. No mutation.
pub fn copy_chunk(chunk: &str, start_tag: &str, end_tag: &str) -> Extracted {
    let start = match scan_for_tag(chunk, start_tag, 0) {
        Some(idx) => idx,
        None => return Extracted::StartMissing,
    };
    let end = match scan_for_tag(chunk, end_tag, start + start_tag.len()) {
        Some(idx) => idx + end_tag.len(),
        None => return Extracted::EndMissing,
    };
    Extracted::Found(chunk[start..end].to_string())
}

/// Extract the chunk spanning `start_tag` through the end of `end_tag` from
/// the working buffer, splicing the span out of the buffer.
///
/// The buffer afterwards is exactly the original minus the removed span and
/// nothing else; extraction is destructive and single-use per chunk.
pub fn remove_chunk(buffer: &mut String, start_tag: &str, end_tag: &str) -> Extracted {
    let start = match scan_for_tag(buffer, start_tag, 0) {
        Some(idx) => idx,
        None => return Extracted::StartMissing,
    };
    let end = match scan_for_tag(buffer, end_tag, start) {
        Some(idx) => idx + end_tag.len(),
        None => return Extracted::EndMissing,
    };
    let chunk = buffer[start..end].to_string();
    buffer.replace_range(start..end, "");
    Extracted::Found(chunk)
}

/// Extract the leaf text strictly between `start_tag` and its derived end
/// tag (`<x>` becomes `</x>`). No mutation.
pub fn extract_value(chunk: &str, start_tag: &str) -> Extracted {
    let end_tag = make_end_tag(start_tag);
    let start = match scan_for_tag(chunk, start_tag, 0) {
        Some(idx) => idx,
        None => return Extracted::StartMissing,
    };
    let end = match scan_for_tag(chunk, &end_tag, start + start_tag.len()) {
        Some(idx) => idx,
        None => return Extracted::EndMissing,
    };
    Extracted::Found(chunk[start + start_tag.len()..end].to_string())
}
