//! Qualified names as written in source (`global::A.B.Gen<int>.X`).

use symck_core::{MetadataName, TypeSegment};

/// A dotted name from source, split into segments with generic arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Written with a `global::` prefix.
    pub global: bool,
    /// Last segment written with a leading `@`.
    pub verbatim: bool,
    pub segments: Vec<TypeSegment>,
}

impl QualifiedName {
    /// Parse a name as it appears in an attribute or using directive.
    ///
    /// Returns `None` for empty input or an unclosed type argument list.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let (global, rest) = match compact.split_once("::") {
            Some(("global", rest)) => (true, rest.to_string()),
            // extern alias qualifier; the alias itself carries no namespace
            Some((_, rest)) => (false, rest.to_string()),
            None => (false, compact),
        };

        let mut segments = Vec::new();
        let mut verbatim = false;
        for part in split_top_level(&rest, '.') {
            let (name, arity) = match part.find('<') {
                Some(open) => {
                    let args = part[open + 1..].strip_suffix('>')?;
                    (&part[..open], split_top_level(args, ',').len())
                }
                None => (part, 0),
            };
            verbatim = name.starts_with('@');
            let name = name.trim_start_matches('@');
            if name.is_empty() {
                return None;
            }
            segments.push(TypeSegment::new(name, arity));
        }

        if segments.is_empty() {
            return None;
        }
        Some(Self {
            global,
            verbatim,
            segments,
        })
    }

    #[must_use]
    pub fn last(&self) -> &TypeSegment {
        // parse guarantees at least one segment
        &self.segments[self.segments.len() - 1]
    }

    /// Copy with the last segment renamed through `rename`.
    #[must_use]
    pub fn map_last(&self, rename: impl FnOnce(&str) -> String) -> Self {
        let mut copy = self.clone();
        if let Some(last) = copy.segments.last_mut() {
            last.name = rename(&last.name);
        }
        copy
    }

    /// Segment names, for names that denote a namespace.
    #[must_use]
    pub fn namespace_parts(&self) -> Vec<String> {
        self.segments.iter().map(|s| s.name.clone()).collect()
    }

    /// Best-effort metadata name, used for error types.
    #[must_use]
    pub fn to_metadata_name(&self) -> MetadataName {
        let count = self.segments.len();
        MetadataName::new(
            self.segments[..count - 1]
                .iter()
                .map(|s| s.name.clone())
                .collect(),
            Vec::new(),
            self.last().clone(),
        )
    }
}

/// Split on `sep` outside of `<...>`.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
