//! Small AST predicates shared by the finder, wrapper, inserter and extractor.

use std::collections::HashSet;

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, Decl, Expr, FnDecl, FnExpr, Function,
    JSXElement, JSXFragment, Lit, Module, ModuleItem, Pat, Stmt,
};
use swc_ecma_visit::{Visit, VisitWith};

/// Identifier of the translation lookup function.
pub const TRANSLATION_FN: &str = "t";

/// Identifier of the hook that hands out the translation function.
pub const TRANSLATION_HOOK: &str = "useTranslation";

/// Statement injected at the top of components and hooks.
pub const HOOK_STATEMENT: &str = "const { t } = useTranslation();";

/// `t(...)` with the bare translation identifier as callee.
pub fn is_translation_call(call: &CallExpr) -> bool {
    matches!(&call.callee, Callee::Expr(callee) if is_ident(callee, TRANSLATION_FN))
}

pub fn is_call_to(call: &CallExpr, name: &str) -> bool {
    matches!(&call.callee, Callee::Expr(callee) if is_ident(callee, name))
}

fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(unparen(expr), Expr::Ident(ident) if ident.sym == name)
}

pub fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

/// Strip parentheses and type casts (`x as T`, `x satisfies T`, `x as const`).
pub fn strip_type_casts(mut expr: &Expr) -> &Expr {
    loop {
        expr = match expr {
            Expr::Paren(inner) => &inner.expr,
            Expr::TsAs(inner) => &inner.expr,
            Expr::TsSatisfies(inner) => &inner.expr,
            Expr::TsConstAssertion(inner) => &inner.expr,
            Expr::TsTypeAssertion(inner) => &inner.expr,
            _ => return expr,
        };
    }
}

/// Name bound by a plain identifier pattern.
pub fn binding_name(pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(binding) => Some(binding.id.sym.to_string()),
        _ => None,
    }
}

/// `useSomething` / `use2Fa`, but not `user` or `use`.
pub fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// `const { ... } = useTranslation(...)`.
pub fn is_hook_acquisition(stmt: &Stmt) -> bool {
    let Stmt::Decl(Decl::Var(var)) = stmt else {
        return false;
    };
    var.decls.iter().any(|decl| {
        matches!(decl.name, Pat::Object(_))
            && decl.init.as_deref().is_some_and(|init| {
                matches!(unparen(init), Expr::Call(call) if is_call_to(call, TRANSLATION_HOOK))
            })
    })
}

/// Expression statement made of a single string literal.
fn directive_span(stmt: &Stmt) -> Option<Span> {
    match stmt {
        Stmt::Expr(expr_stmt) => match &*expr_stmt.expr {
            Expr::Lit(Lit::Str(s)) => Some(s.span),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================
// Subtree searches
// ============================================================

/// Whether a function or arrow contains JSX anywhere inside.
pub fn contains_jsx<N: VisitWith<JsxFinder>>(node: &N) -> bool {
    let mut finder = JsxFinder { found: false };
    node.visit_with(&mut finder);
    finder.found
}

pub struct JsxFinder {
    found: bool,
}

impl Visit for JsxFinder {
    fn visit_jsx_element(&mut self, _: &JSXElement) {
        self.found = true;
    }

    fn visit_jsx_fragment(&mut self, _: &JSXFragment) {
        self.found = true;
    }
}

/// Whether a subtree already calls `t(...)`.
pub fn contains_translation_call<N: VisitWith<TranslationCallFinder>>(node: &N) -> bool {
    let mut finder = TranslationCallFinder {
        found: false,
        skip_functions: false,
        depth: 0,
    };
    node.visit_with(&mut finder);
    finder.found
}

/// Whether a module calls `t(...)` outside of any function declaration,
/// function expression or arrow. Class and object methods do not count as
/// functions here.
pub fn contains_module_level_translation_call(module: &Module) -> bool {
    let mut finder = TranslationCallFinder {
        found: false,
        skip_functions: true,
        depth: 0,
    };
    module.visit_with(&mut finder);
    finder.found
}

pub struct TranslationCallFinder {
    found: bool,
    skip_functions: bool,
    depth: usize,
}

impl Visit for TranslationCallFinder {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_translation_call(node) && (!self.skip_functions || self.depth == 0) {
            self.found = true;
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.depth += 1;
        node.visit_children_with(self);
        self.depth -= 1;
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        self.depth += 1;
        node.visit_children_with(self);
        self.depth -= 1;
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.depth += 1;
        node.visit_children_with(self);
        self.depth -= 1;
    }
}

// ============================================================
// Directive prologues
// ============================================================

/// Spans of the string literals forming directive prologues
/// (`"use client"`, `"use strict"`) of the module and of every function body.
pub fn directive_spans(module: &Module) -> HashSet<Span> {
    let mut collector = DirectiveCollector::default();
    for item in &module.body {
        match item {
            ModuleItem::Stmt(stmt) => match directive_span(stmt) {
                Some(span) => {
                    collector.spans.insert(span);
                }
                None => break,
            },
            ModuleItem::ModuleDecl(_) => break,
        }
    }
    module.visit_with(&mut collector);
    collector.spans
}

#[derive(Default)]
struct DirectiveCollector {
    spans: HashSet<Span>,
}

impl DirectiveCollector {
    fn collect_prologue(&mut self, body: &BlockStmt) {
        self.spans
            .extend(body.stmts.iter().map_while(directive_span));
    }
}

impl Visit for DirectiveCollector {
    fn visit_function(&mut self, node: &Function) {
        if let Some(body) = &node.body {
            self.collect_prologue(body);
        }
        node.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        if let BlockStmtOrExpr::BlockStmt(body) = &*node.body {
            self.collect_prologue(body);
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::parse_source;

    fn parse(code: &str) -> Module {
        parse_source(code.to_string(), "test.tsx").unwrap().module
    }

    #[test]
    fn test_hook_names() {
        assert!(is_hook_name("useUser"));
        assert!(is_hook_name("use2Fa"));
        assert!(!is_hook_name("user"));
        assert!(!is_hook_name("use"));
        assert!(!is_hook_name("usemodal"));
    }

    #[test]
    fn test_component_names() {
        assert!(is_component_name("Button"));
        assert!(!is_component_name("button"));
        assert!(!is_component_name("_Button"));
        assert!(!is_component_name(""));
    }

    #[test]
    fn test_hook_acquisition() {
        let module = parse("const { t, i18n } = useTranslation('common');");
        let ModuleItem::Stmt(stmt) = &module.body[0] else {
            panic!("expected statement");
        };
        assert!(is_hook_acquisition(stmt));

        let module = parse("const t = useTranslation();");
        let ModuleItem::Stmt(stmt) = &module.body[0] else {
            panic!("expected statement");
        };
        assert!(!is_hook_acquisition(stmt));
    }

    #[test]
    fn test_module_level_call_ignores_functions() {
        let module = parse("function f() { return t('a'); }");
        assert!(contains_translation_call(&module));
        assert!(!contains_module_level_translation_call(&module));

        let module = parse("const title = t('a');");
        assert!(contains_module_level_translation_call(&module));
    }

    #[test]
    fn test_directive_spans() {
        let code = r#""use client";
const a = "x";
function f() { "use strict"; return "y"; }"#;
        let module = parse(code);
        let spans = directive_spans(&module);
        assert_eq!(spans.len(), 2);
    }
}
