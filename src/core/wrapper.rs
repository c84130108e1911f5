//! Wrapping of natural-language text in `t(...)` calls.
//!
//! Each context is processed with three passes that look at disjoint node
//! kinds: string literals (including JSX attribute strings), JSX text, and
//! untagged template literals. Wraps are recorded in the tree's
//! [`RewriteSet`](super::rewrite::RewriteSet), which also serves as the
//! "already wrapped" marker, so running the wrapper again is a no-op.
//!
//! ## Scope
//!
//! A function context covers its whole subtree, nested functions included.
//! The module scope context covers everything that is not inside a function
//! declaration, function expression or arrow (class and object methods are
//! still visited), and additionally leaves alone `require(...)` and
//! `import(...)` arguments and computed property keys.
//!
//! Never wrapped, in any scope: direct string or template arguments of
//! `t(...)`, directive prologues, import and export declarations, object
//! property keys, TypeScript types, interfaces and enums, and the literal
//! parts of tagged templates.

use std::collections::HashSet;

use swc_common::{BytePos, Span};
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Callee, ExportAll, Expr, FnDecl, FnExpr, ImportDecl, JSXAttr,
    JSXAttrValue, JSXText, Lit, NamedExport, PropName, Str, Tpl, TsEnumDecl, TsInterfaceDecl,
    TsType,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{
    finder::TranslationContext,
    language::Classifier,
    rewrite::{Piece, RewriteSet, SourceText, WrapOwner},
    template::{TemplateKey, quote},
    tree::SourceTree,
    utils::{TRANSLATION_FN, is_call_to, is_translation_call},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    StringLiteral,
    JsxText,
    Template,
}

const PASSES: [Pass; 3] = [Pass::StringLiteral, Pass::JsxText, Pass::Template];

pub struct TextWrapper<'a> {
    contexts: &'a [TranslationContext],
    classifier: &'a Classifier,
}

impl<'a> TextWrapper<'a> {
    pub fn new(contexts: &'a [TranslationContext], classifier: &'a Classifier) -> Self {
        Self {
            contexts,
            classifier,
        }
    }

    /// Wrap every eligible text node of every context. Returns whether
    /// anything new was wrapped.
    pub fn wrap(&self, tree: &mut SourceTree) -> bool {
        let SourceTree {
            module,
            source,
            directives,
            rewrites,
            ..
        } = tree;

        let mut changed = false;
        for context in self.contexts {
            for pass in PASSES {
                let mut visitor = PassVisitor::new(
                    source,
                    directives,
                    rewrites,
                    self.classifier,
                    context,
                    pass,
                );
                module.visit_with(&mut visitor);
                changed |= visitor.changed;
            }
        }
        changed
    }
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    Function(Span),
    Module,
}

struct PassVisitor<'a> {
    source: &'a SourceText,
    directives: &'a HashSet<Span>,
    rewrites: &'a mut RewriteSet,
    classifier: &'a Classifier,
    pass: Pass,
    scope: Scope,
    /// Inside the target context.
    active: bool,
    changed: bool,
}

impl<'a> PassVisitor<'a> {
    fn new(
        source: &'a SourceText,
        directives: &'a HashSet<Span>,
        rewrites: &'a mut RewriteSet,
        classifier: &'a Classifier,
        context: &TranslationContext,
        pass: Pass,
    ) -> Self {
        let scope = match context {
            TranslationContext::Function(function) => Scope::Function(function.span),
            TranslationContext::ModuleScope(_) => Scope::Module,
        };
        Self {
            source,
            directives,
            rewrites,
            classifier,
            pass,
            scope,
            active: matches!(scope, Scope::Module),
            changed: false,
        }
    }

    fn owner(&self) -> WrapOwner {
        match self.scope {
            Scope::Function(span) => WrapOwner::Function(span),
            Scope::Module => WrapOwner::Module,
        }
    }

    fn in_module_scope(&self) -> bool {
        matches!(self.scope, Scope::Module)
    }

    fn record(&mut self, span: Span, pieces: Vec<Piece>) {
        let owner = self.owner();
        if self.rewrites.wrap(span, owner, pieces) {
            self.changed = true;
        }
    }

    /// Descend into a function node, activating the pass when it is the
    /// target context and skipping subtrees that cannot contain it.
    fn enter_function(&mut self, span: Span, visit_children: impl FnOnce(&mut Self)) {
        match self.scope {
            Scope::Module => {}
            Scope::Function(_) if self.active => visit_children(self),
            Scope::Function(target) if span == target => {
                self.active = true;
                visit_children(self);
                self.active = false;
            }
            Scope::Function(target) => {
                if span.lo <= target.lo && target.hi <= span.hi {
                    visit_children(self);
                }
            }
        }
    }

    // ============================================================
    // Wrapping
    // ============================================================

    fn wrap_string(&mut self, s: &Str) {
        if self.rewrites.is_wrapped(s.span) || self.directives.contains(&s.span) {
            return;
        }
        let Some(value) = s.value.as_str() else {
            return;
        };
        if !self.classifier.contains_target_language(value) {
            return;
        }
        let raw = self.source.slice(s.span);
        self.record(
            s.span,
            vec![Piece::Text(format!("{}({})", TRANSLATION_FN, raw))],
        );
    }

    /// `placeholder="..."` becomes `placeholder={t("...")}`.
    fn wrap_attr_string(&mut self, s: &Str) {
        if self.rewrites.is_wrapped(s.span) {
            return;
        }
        let Some(value) = s.value.as_str() else {
            return;
        };
        if !self.classifier.contains_target_language(value) {
            return;
        }
        self.record(
            s.span,
            vec![Piece::Text(format!("{{{}({})}}", TRANSLATION_FN, quote(value)))],
        );
    }

    /// Only the trimmed text is replaced; surrounding whitespace stays.
    fn wrap_jsx_text(&mut self, node: &JSXText) {
        let key = node.value.trim();
        if key.is_empty() || !self.classifier.contains_target_language(key) {
            return;
        }

        let raw = self.source.slice(node.span);
        let leading = raw.len() - raw.trim_start().len();
        let trailing = raw.len() - raw.trim_end().len();
        let span = Span::new(
            BytePos(node.span.lo.0 + leading as u32),
            BytePos(node.span.hi.0 - trailing as u32),
        );
        if self.rewrites.is_wrapped(span) {
            return;
        }

        self.record(
            span,
            vec![Piece::Text(format!("{{{}({})}}", TRANSLATION_FN, quote(key)))],
        );
    }

    fn wrap_template(&mut self, tpl: &Tpl) {
        if self.rewrites.is_wrapped(tpl.span) {
            return;
        }
        let key = TemplateKey::build(tpl, self.source);
        if !self.classifier.contains_target_language(&key.key) {
            return;
        }
        self.record(tpl.span, key.call_pieces());
    }
}

impl Visit for PassVisitor<'_> {
    // ------------------------------------------------------------
    // Scope boundaries
    // ------------------------------------------------------------

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.enter_function(node.function.span, |v| node.visit_children_with(v));
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        self.enter_function(node.function.span, |v| node.visit_children_with(v));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.enter_function(node.span, |v| node.visit_children_with(v));
    }

    // ------------------------------------------------------------
    // Exempt positions
    // ------------------------------------------------------------

    fn visit_import_decl(&mut self, _: &ImportDecl) {}

    fn visit_named_export(&mut self, _: &NamedExport) {}

    fn visit_export_all(&mut self, _: &ExportAll) {}

    fn visit_ts_type(&mut self, _: &TsType) {}

    fn visit_ts_interface_decl(&mut self, _: &TsInterfaceDecl) {}

    fn visit_ts_enum_decl(&mut self, _: &TsEnumDecl) {}

    fn visit_prop_name(&mut self, node: &PropName) {
        if !self.in_module_scope() {
            node.visit_children_with(self);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_translation_call(node) {
            node.callee.visit_with(self);
            for arg in &node.args {
                if !matches!(&*arg.expr, Expr::Lit(Lit::Str(_)) | Expr::Tpl(_)) {
                    arg.visit_with(self);
                }
            }
            return;
        }

        let is_module_request =
            is_call_to(node, "require") || matches!(node.callee, Callee::Import(_));
        if self.in_module_scope() && is_module_request {
            return;
        }

        node.visit_children_with(self);
    }

    // ------------------------------------------------------------
    // Text nodes
    // ------------------------------------------------------------

    fn visit_expr(&mut self, node: &Expr) {
        match node {
            Expr::Lit(Lit::Str(s)) => {
                if self.active && self.pass == Pass::StringLiteral {
                    self.wrap_string(s);
                }
            }
            Expr::Tpl(tpl) => {
                if self.active && self.pass == Pass::Template {
                    self.wrap_template(tpl);
                }
                tpl.visit_children_with(self);
            }
            Expr::TaggedTpl(tagged) => {
                tagged.tag.visit_with(self);
                for expr in &tagged.tpl.exprs {
                    expr.visit_with(self);
                }
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        if let Some(JSXAttrValue::Str(s)) = &node.value {
            if self.active && self.pass == Pass::StringLiteral {
                self.wrap_attr_string(s);
            }
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        if self.active && self.pass == Pass::JsxText {
            self.wrap_jsx_text(node);
        }
    }
}
