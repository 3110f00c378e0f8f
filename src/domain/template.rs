//! Filename templates with `{placeholder}` segments
//!
//! A template splits into an alternating run of static and placeholder
//! segments. Segments fully partition the input: concatenating them in
//! order reconstructs the original string exactly. There is no nesting;
//! wrapper characters that never close are folded into the trailing
//! static segment.

/// Wrapper characters delimiting a placeholder, unless overridden
pub const DEFAULT_WRAPPERS: (char, char) = ('{', '}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Static,
    Placeholder,
}

/// One contiguous run of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Segment text; placeholder segments include their wrapper characters
    pub text: String,
    /// Byte offset of the segment start in the original string
    pub start: usize,
    /// Byte offset one past the segment end
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inner name of a placeholder segment (text without the wrappers)
    pub fn name(&self) -> Option<&str> {
        if self.kind != SegmentKind::Placeholder {
            return None;
        }
        let open = self.text.chars().next().map_or(0, char::len_utf8);
        let close = self.text.chars().next_back().map_or(0, char::len_utf8);
        self.text
            .get(open..self.text.len().saturating_sub(close))
            .or(Some(""))
    }
}

/// A parsed filename template
#[derive(Debug, Clone)]
pub struct Template {
    original: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template using the default `{` `}` wrappers
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, DEFAULT_WRAPPERS.0, DEFAULT_WRAPPERS.1)
    }

    /// Parses a template with a custom wrapper pair.
    ///
    /// Scans character by character: an opening wrapper flushes the pending
    /// text as a static segment and starts collecting; the closing wrapper
    /// flushes the collected text (wrappers included) as a placeholder. A
    /// trailing partial segment, including one left by an unmatched opening
    /// wrapper, is flushed as static.
    pub fn parse_with(text: &str, open: char, close: char) -> Self {
        let mut segments = Vec::new();
        let mut buf = String::new();
        let mut buf_start = 0;

        for (pos, ch) in text.char_indices() {
            if ch == open {
                if !buf.is_empty() {
                    segments.push(Segment {
                        kind: SegmentKind::Static,
                        text: std::mem::take(&mut buf),
                        start: buf_start,
                        end: pos,
                    });
                }
                buf_start = pos;
            }

            buf.push(ch);

            if ch == close {
                let end = pos + ch.len_utf8();
                segments.push(Segment {
                    kind: SegmentKind::Placeholder,
                    text: std::mem::take(&mut buf),
                    start: buf_start,
                    end,
                });
                buf_start = end;
            }
        }

        if !buf.is_empty() {
            segments.push(Segment {
                kind: SegmentKind::Static,
                text: buf,
                start: buf_start,
                end: text.len(),
            });
        }

        Self {
            original: text.to_string(),
            segments,
        }
    }

    /// The string the template was parsed from
    pub fn original(&self) -> &str {
        &self.original
    }

    /// All segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The static segments, in order
    pub fn static_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Static)
    }

    /// The placeholder segments, in order
    pub fn placeholders(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Placeholder)
    }
}
