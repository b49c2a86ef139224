//! Splicing rewritten declaration values back into the stylesheet source.

use core::ops::Range;

/// One value replacement, by byte span of the original source.
struct Edit {
    span: Range<usize>,
    replacement: String,
}

/// Accumulates replacements against a source text and applies them in one pass.
pub struct SourceEdits<'source> {
    /// Original stylesheet text.
    source: &'source str,
    /// Pending replacements, in any order.
    edits: Vec<Edit>,
}

impl<'source> SourceEdits<'source> {
    #[inline]
    pub const fn new(source: &'source str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    #[inline]
    pub fn replace(&mut self, span: Range<usize>, replacement: String) {
        self.edits.push(Edit { span, replacement });
    }

    /// Produce the edited text. Text outside the edited spans is copied unchanged; an
    /// edit overlapping an earlier one, or not on character boundaries, is dropped.
    pub fn finish(mut self) -> String {
        if self.edits.is_empty() {
            return self.source.to_owned();
        }
        self.edits.sort_by_key(|edit| edit.span.start);

        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0usize;
        for edit in &self.edits {
            let (Some(untouched), Some(_)) = (
                self.source.get(cursor..edit.span.start),
                self.source.get(edit.span.clone()),
            ) else {
                continue;
            };
            out.push_str(untouched);
            out.push_str(&edit.replacement);
            cursor = edit.span.end;
        }
        out.push_str(self.source.get(cursor..).unwrap_or_default());
        out
    }
}
