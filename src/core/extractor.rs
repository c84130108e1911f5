//! Read-only collection of target-language text.
//!
//! The extractor sees the file as parsed, so it works the same before and
//! after the wrapper ran on a previous session: text that sits anywhere inside
//! a `t(...)` call is reported as already wrapped. JSX text is never inside a
//! call, which makes it always unwrapped.

use std::collections::HashSet;

use serde::Serialize;
use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Callee, DefaultDecl, ExportAll, ExportDefaultDecl, Expr, FnDecl, FnExpr,
    ImportDecl, JSXText, NamedExport, PropName, Str, TaggedTpl, Tpl, TsEnumDecl, TsInterfaceDecl,
    TsType, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{
    language::Classifier,
    rewrite::SourceText,
    template::TemplateKey,
    tree::SourceTree,
    utils::{binding_name, is_call_to, is_translation_call, unparen},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOccurrence {
    /// Literal value, trimmed JSX text, or template source.
    pub raw_text: String,
    /// Catalog key. Equal to `raw_text` except for templates.
    pub normalized_key: String,
    pub is_already_wrapped: bool,
    /// `<file>/<name>` of the nearest named function, else of the nearest
    /// variable declarator. The name segment is empty when neither exists.
    pub container_path: String,
}

pub fn extract(tree: &SourceTree, classifier: &Classifier) -> Vec<TextOccurrence> {
    let mut extractor = Extractor {
        path: tree.path(),
        source: &tree.source,
        classifier,
        directives: &tree.directives,
        frames: Vec::new(),
        translation_calls: 0,
        occurrences: Vec::new(),
    };
    tree.module.visit_with(&mut extractor);
    extractor.occurrences
}

/// Enclosing scopes that can name a container.
enum Frame {
    Function(Option<String>),
    Declarator(Option<String>),
}

struct Extractor<'a> {
    path: &'a str,
    source: &'a SourceText,
    classifier: &'a Classifier,
    directives: &'a HashSet<Span>,
    frames: Vec<Frame>,
    /// Number of enclosing `t(...)` calls.
    translation_calls: usize,
    occurrences: Vec<TextOccurrence>,
}

impl Extractor<'_> {
    fn container_name(&self) -> &str {
        let function = self.frames.iter().rev().find_map(|frame| match frame {
            Frame::Function(name) => Some(name),
            Frame::Declarator(_) => None,
        });
        let name = match function {
            Some(name) => name,
            None => match self.frames.last() {
                Some(Frame::Declarator(name)) => name,
                _ => return "",
            },
        };
        name.as_deref().unwrap_or("")
    }

    fn push(&mut self, raw_text: String, normalized_key: String, is_already_wrapped: bool) {
        let container_path = format!("{}/{}", self.path, self.container_name());
        self.occurrences.push(TextOccurrence {
            raw_text,
            normalized_key,
            is_already_wrapped,
            container_path,
        });
    }

    fn in_function(&self) -> bool {
        self.frames.iter().any(|frame| matches!(frame, Frame::Function(_)))
    }

    fn in_frame(&mut self, frame: Frame, visit: impl FnOnce(&mut Self)) {
        self.frames.push(frame);
        visit(self);
        self.frames.pop();
    }

    fn visit_bound_function(&mut self, init: &Expr, name: Option<String>) {
        match unparen(init) {
            Expr::Arrow(arrow) => {
                self.in_frame(Frame::Function(name), |v| arrow.visit_children_with(v))
            }
            Expr::Fn(fn_expr) => {
                self.in_frame(Frame::Function(name), |v| fn_expr.function.visit_with(v))
            }
            _ => init.visit_with(self),
        }
    }
}

impl Visit for Extractor<'_> {
    fn visit_fn_decl(&mut self, node: &FnDecl) {
        let name = Some(node.ident.sym.to_string());
        self.in_frame(Frame::Function(name), |v| node.function.visit_with(v));
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        self.in_frame(Frame::Function(None), |v| node.function.visit_with(v));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.in_frame(Frame::Function(None), |v| node.visit_children_with(v));
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        match &node.decl {
            DefaultDecl::Fn(fn_expr) => {
                let name = fn_expr.ident.as_ref().map(|ident| ident.sym.to_string());
                self.in_frame(Frame::Function(name), |v| fn_expr.function.visit_with(v));
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let name = binding_name(&node.name);
        self.in_frame(Frame::Declarator(name.clone()), |v| {
            node.name.visit_with(v);
            if let Some(init) = &node.init {
                v.visit_bound_function(init, name);
            }
        });
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_translation_call(node) {
            self.translation_calls += 1;
            node.visit_children_with(self);
            self.translation_calls -= 1;
            return;
        }

        // Module paths outside functions are never wrapped.
        let is_module_request =
            is_call_to(node, "require") || matches!(node.callee, Callee::Import(_));
        if is_module_request && !self.in_function() {
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_import_decl(&mut self, _: &ImportDecl) {}

    fn visit_named_export(&mut self, _: &NamedExport) {}

    fn visit_export_all(&mut self, _: &ExportAll) {}

    fn visit_ts_type(&mut self, _: &TsType) {}

    fn visit_ts_interface_decl(&mut self, _: &TsInterfaceDecl) {}

    fn visit_ts_enum_decl(&mut self, _: &TsEnumDecl) {}

    fn visit_prop_name(&mut self, node: &PropName) {
        if let PropName::Computed(computed) = node {
            computed.visit_with(self);
        }
    }

    fn visit_str(&mut self, node: &Str) {
        if self.directives.contains(&node.span) {
            return;
        }
        let Some(value) = node.value.as_str() else {
            return;
        };
        if self.classifier.contains_target_language(value) {
            self.push(value.to_string(), value.to_string(), self.translation_calls > 0);
        }
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let text = node.value.trim();
        if !text.is_empty() && self.classifier.contains_target_language(text) {
            self.push(text.to_string(), text.to_string(), false);
        }
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        let key = TemplateKey::build(node, self.source);
        if self.classifier.contains_target_language(&key.key) {
            let raw = self.source.slice(node.span).to_string();
            self.push(raw, key.key, self.translation_calls > 0);
        }
        node.visit_children_with(self);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.tag.visit_with(self);
        for expr in &node.tpl.exprs {
            expr.visit_with(self);
        }
    }
}
