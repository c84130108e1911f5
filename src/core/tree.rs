use std::collections::HashSet;

use swc_common::{BytePos, Span};
use swc_ecma_ast::Module;

use super::{
    rewrite::{RewriteSet, SourceText},
    utils::directive_spans,
};

/// A parsed source file and the edits recorded against it.
///
/// The module is read-only. Wrapping and scaffolding go into `rewrites`,
/// and [`SourceTree::print`] renders the result.
#[derive(Debug)]
pub struct SourceTree {
    path: String,
    pub module: Module,
    pub(crate) source: SourceText,
    pub(crate) directives: HashSet<Span>,
    pub(crate) rewrites: RewriteSet,
}

impl SourceTree {
    pub(crate) fn new(path: String, module: Module, code: String, start_pos: BytePos) -> Self {
        let directives = directive_spans(&module);
        Self {
            path,
            module,
            source: SourceText::new(code, start_pos),
            directives,
            rewrites: RewriteSet::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn rewrites(&self) -> &RewriteSet {
        &self.rewrites
    }

    /// Whether the printed file would differ in content: a wrap, hook or
    /// import was recorded.
    pub fn is_modified(&self) -> bool {
        self.rewrites.has_content_edits()
    }

    /// Render the source with all recorded edits applied.
    pub fn print(&self) -> String {
        self.rewrites.render(&self.source)
    }
}
