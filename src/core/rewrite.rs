//! Rewrite side table and the printer that applies it.
//!
//! The parsed module is never mutated. Passes record what they want changed
//! here instead, keyed by source span:
//!
//! - **replacements** swap a node's source range for a sequence of [`Piece`]s.
//!   A piece can point back into the original source, and that range is
//!   rendered with its own nested edits applied, so a template literal that
//!   is replaced as a whole still keeps the wraps made inside its
//!   interpolations.
//! - **insertions** place text at a byte position. Several insertions at the
//!   same position are ordered by their [`Slot`].
//!
//! The table also remembers which node spans are wrapped, which arrow bodies
//! were normalized, which contexts received a hook and which identifiers were
//! imported. Those markers make every pass idempotent on the same tree.

use std::collections::{BTreeSet, HashMap, HashSet};

use swc_common::{BytePos, Span};

/// Original source text together with the position of its first byte.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    start: BytePos,
}

impl SourceText {
    pub fn new(text: String, start: BytePos) -> Self {
        Self { text, start }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> BytePos {
        self.start
    }

    pub fn end(&self) -> BytePos {
        BytePos(self.start.0 + self.text.len() as u32)
    }

    fn offset(&self, pos: BytePos) -> usize {
        let offset = pos.0.saturating_sub(self.start.0) as usize;
        offset.min(self.text.len())
    }

    /// Source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        let lo = self.offset(span.lo);
        let hi = self.offset(span.hi).max(lo);
        self.text.get(lo..hi).unwrap_or_default()
    }

    /// Source text between `lo` and `hi`.
    pub fn between(&self, lo: BytePos, hi: BytePos) -> &str {
        self.slice(Span::new(lo, hi))
    }

    /// Indentation of the line that contains `pos`, if `pos` is the first
    /// non-blank character of that line.
    pub fn line_indent(&self, pos: BytePos) -> Option<&str> {
        let offset = self.offset(pos);
        let line_start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let indent = &self.text[line_start..offset];
        indent
            .chars()
            .all(|c| c == ' ' || c == '\t')
            .then_some(indent)
    }
}

/// Context that recorded a wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapOwner {
    Function(Span),
    Module,
}

/// One element of a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    /// A range of the original source, rendered with nested edits.
    Source(Span),
}

/// Ordering of insertions that share a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    BlockOpen,
    Hook,
    Return,
    Import,
    BlockClose,
}

#[derive(Debug, Clone)]
struct Replacement {
    span: Span,
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone)]
struct Insertion {
    pos: BytePos,
    slot: Slot,
    order: u32,
    text: String,
}

#[derive(Debug, Default, Clone)]
pub struct RewriteSet {
    replacements: Vec<Replacement>,
    insertions: Vec<Insertion>,
    wrapped: HashMap<Span, WrapOwner>,
    normalized: HashSet<Span>,
    hooked: HashSet<Span>,
    imported: BTreeSet<String>,
    sequence: u32,
}

impl RewriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a wrap, hook or import was recorded. Block normalization on
    /// its own does not count: it only prepares bodies for a hook.
    pub fn has_content_edits(&self) -> bool {
        !self.wrapped.is_empty() || !self.hooked.is_empty() || !self.imported.is_empty()
    }

    // ============================================================
    // Wrap markers
    // ============================================================

    pub fn is_wrapped(&self, span: Span) -> bool {
        self.wrapped.contains_key(&span)
    }

    /// Record a wrap of the node at `span`. Returns false if the node was
    /// already wrapped.
    pub fn wrap(&mut self, span: Span, owner: WrapOwner, pieces: Vec<Piece>) -> bool {
        if self.is_wrapped(span) {
            return false;
        }
        debug_assert!(
            !pieces.contains(&Piece::Source(span)),
            "a replacement cannot render its own span"
        );
        self.wrapped.insert(span, owner);
        self.replacements.push(Replacement { span, pieces });
        true
    }

    /// Whether any wrap was recorded inside `span`.
    pub fn has_wrap_within(&self, span: Span) -> bool {
        self.wrapped
            .keys()
            .any(|wrapped| span.lo <= wrapped.lo && wrapped.hi <= span.hi)
    }

    /// Whether the module-scope pass recorded any wrap.
    pub fn has_module_level_wrap(&self) -> bool {
        self.wrapped.values().any(|owner| *owner == WrapOwner::Module)
    }

    pub fn wrap_count(&self) -> usize {
        self.wrapped.len()
    }

    // ============================================================
    // Scaffolding markers
    // ============================================================

    pub fn is_normalized(&self, body: Span) -> bool {
        self.normalized.contains(&body)
    }

    /// Turn the expression body at `body` into `{ return <expr>; }`.
    pub fn normalize_body(&mut self, body: Span) -> bool {
        if !self.normalized.insert(body) {
            return false;
        }
        self.insert(body.lo, Slot::BlockOpen, "{ ");
        self.insert(body.lo, Slot::Return, "return ");
        // Inner bodies close before outer ones that end at the same byte.
        self.insertions.push(Insertion {
            pos: body.hi,
            slot: Slot::BlockClose,
            order: u32::MAX - body.lo.0,
            text: "; }".to_string(),
        });
        true
    }

    pub fn is_hooked(&self, context: Span) -> bool {
        self.hooked.contains(&context)
    }

    pub fn inject_hook(&mut self, context: Span, pos: BytePos, text: String) -> bool {
        if !self.hooked.insert(context) {
            return false;
        }
        self.insert(pos, Slot::Hook, text);
        true
    }

    pub fn is_imported(&self, identifier: &str) -> bool {
        self.imported.contains(identifier)
    }

    pub fn mark_imported(&mut self, identifier: &str) {
        self.imported.insert(identifier.to_string());
    }

    pub fn insert_import(&mut self, pos: BytePos, text: String) {
        self.insert(pos, Slot::Import, text);
    }

    fn insert(&mut self, pos: BytePos, slot: Slot, text: impl Into<String>) {
        self.sequence += 1;
        self.insertions.push(Insertion {
            pos,
            slot,
            order: self.sequence,
            text: text.into(),
        });
    }

    // ============================================================
    // Printing
    // ============================================================

    /// Apply every recorded edit to `source`.
    pub fn render(&self, source: &SourceText) -> String {
        let mut replacements: Vec<&Replacement> = self.replacements.iter().collect();
        replacements.sort_by(|a, b| a.span.lo.cmp(&b.span.lo).then(b.span.hi.cmp(&a.span.hi)));

        let mut insertions: Vec<&Insertion> = self.insertions.iter().collect();
        insertions.sort_by(|a, b| {
            a.pos
                .cmp(&b.pos)
                .then(a.slot.cmp(&b.slot))
                .then(a.order.cmp(&b.order))
        });

        let printer = Printer {
            source,
            replacements,
            insertions,
        };
        let mut out = String::with_capacity(source.as_str().len() + 64);
        printer.render_range(source.start(), source.end(), &mut out);
        out
    }
}

struct Printer<'a> {
    source: &'a SourceText,
    replacements: Vec<&'a Replacement>,
    insertions: Vec<&'a Insertion>,
}

impl Printer<'_> {
    fn render_range(&self, lo: BytePos, hi: BytePos, out: &mut String) {
        let mut cursor = lo;
        for replacement in self.outermost_replacements(lo, hi) {
            self.render_plain(cursor, replacement.span.lo, out);
            for piece in &replacement.pieces {
                match piece {
                    Piece::Text(text) => out.push_str(text),
                    Piece::Source(span) => self.render_range(span.lo, span.hi, out),
                }
            }
            cursor = replacement.span.hi;
        }
        self.render_plain(cursor, hi, out);
    }

    /// Replacements inside `lo..hi` that are not nested in another one.
    fn outermost_replacements(&self, lo: BytePos, hi: BytePos) -> Vec<&Replacement> {
        let mut result: Vec<&Replacement> = Vec::new();
        let mut covered_until = lo;
        for replacement in &self.replacements {
            let span = replacement.span;
            if span.lo < lo || span.hi > hi || span.lo < covered_until {
                continue;
            }
            covered_until = span.hi;
            result.push(replacement);
        }
        result
    }

    /// Copy unedited source between `lo` and `hi`, placing the insertions
    /// that fall on that range (both ends included).
    fn render_plain(&self, lo: BytePos, hi: BytePos, out: &mut String) {
        let start = self.insertions.partition_point(|i| i.pos < lo);
        let mut cursor = lo;
        for insertion in &self.insertions[start..] {
            if insertion.pos > hi {
                break;
            }
            out.push_str(self.source.between(cursor, insertion.pos));
            out.push_str(&insertion.text);
            cursor = insertion.pos;
        }
        out.push_str(self.source.between(cursor, hi));
    }
}
