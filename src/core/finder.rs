//! Translation context discovery.
//!
//! A context is a scope that may receive translation scaffolding: React
//! components, custom hooks and, in aggressive mode, every function plus the
//! module itself.
//!
//! ## Naming
//!
//! A function's name comes from its own identifier (`function Foo() {}`,
//! `const x = function Foo() {}`), otherwise from the variable declarator that
//! binds it (`const Foo = () => ...`, parentheses ignored). Functions passed
//! to calls such as `memo(() => ...)` have no name and are never components
//! or hooks.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, Expr, FnDecl, FnExpr, Function, Module, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::utils::{
    binding_name, contains_jsx, contains_module_level_translation_call, contains_translation_call,
    is_component_name, is_hook_acquisition, is_hook_name, unparen,
};

/// What makes a function a component or hook context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionRole {
    /// Capitalized name and JSX somewhere in the body.
    Component,
    /// Name matching `use[A-Z0-9]...`.
    Hook,
}

/// Shape of a function body, captured when the context is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBody {
    Block {
        span: Span,
        first_stmt: Option<Span>,
        starts_with_hook: bool,
    },
    /// Implicit-return arrow body.
    Expr { span: Span },
    /// Overload signatures and `declare function`.
    Missing,
}

impl FunctionBody {
    fn of_block(block: &BlockStmt) -> Self {
        FunctionBody::Block {
            span: block.span,
            first_stmt: block.stmts.first().map(|stmt| stmt.span()),
            starts_with_hook: block.stmts.first().is_some_and(is_hook_acquisition),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionContext {
    /// Span of the function or arrow node. Identifies the context.
    pub span: Span,
    pub name: Option<String>,
    /// `None` for functions collected only because of aggressive mode.
    pub role: Option<FunctionRole>,
    /// No enclosing function declaration, function expression or arrow.
    pub top_level: bool,
    pub body: FunctionBody,
    /// Already calls `t(...)` somewhere inside, before any wrapping.
    pub has_translation_call: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    pub span: Span,
    /// `t(...)` anywhere in the file.
    pub has_translation_call: bool,
    /// `t(...)` outside of every function.
    pub has_module_level_call: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationContext {
    Function(FunctionContext),
    ModuleScope(ModuleContext),
}

impl TranslationContext {
    pub fn span(&self) -> Span {
        match self {
            TranslationContext::Function(function) => function.span,
            TranslationContext::ModuleScope(module) => module.span,
        }
    }

    pub fn role(&self) -> Option<FunctionRole> {
        match self {
            TranslationContext::Function(function) => function.role,
            TranslationContext::ModuleScope(_) => None,
        }
    }

    /// Human-readable name for diagnostics.
    pub fn label(&self) -> &str {
        match self {
            TranslationContext::Function(function) => {
                function.name.as_deref().unwrap_or("<anonymous>")
            }
            TranslationContext::ModuleScope(_) => "<module>",
        }
    }
}

/// Find translation contexts in pre-order: enclosing functions come before
/// the functions nested in them. In aggressive mode the module scope is
/// appended last.
pub fn find_contexts(module: &Module, aggressive: bool) -> Vec<TranslationContext> {
    let mut finder = ContextFinder {
        aggressive,
        depth: 0,
        contexts: Vec::new(),
    };
    module.visit_with(&mut finder);

    let mut contexts = finder.contexts;
    if aggressive {
        contexts.push(TranslationContext::ModuleScope(ModuleContext {
            span: module.span,
            has_translation_call: contains_translation_call(module),
            has_module_level_call: contains_module_level_translation_call(module),
        }));
    }
    contexts
}

struct ContextFinder {
    aggressive: bool,
    /// Number of enclosing function declarations, expressions and arrows.
    depth: usize,
    contexts: Vec<TranslationContext>,
}

impl ContextFinder {
    fn role_for(&self, name: Option<&str>, has_jsx: impl FnOnce() -> bool) -> Option<FunctionRole> {
        let name = name?;
        if is_component_name(name) && has_jsx() {
            Some(FunctionRole::Component)
        } else if is_hook_name(name) {
            Some(FunctionRole::Hook)
        } else {
            None
        }
    }

    fn push(
        &mut self,
        span: Span,
        name: Option<String>,
        role: Option<FunctionRole>,
        body: FunctionBody,
        has_translation_call: bool,
    ) {
        self.contexts.push(TranslationContext::Function(FunctionContext {
            span,
            name,
            role,
            top_level: self.depth == 0,
            body,
            has_translation_call,
        }));
    }

    fn enter_function(&mut self, function: &Function, name: Option<String>) {
        let role = self.role_for(name.as_deref(), || {
            function.body.as_ref().is_some_and(|body| contains_jsx(body))
        });

        if role.is_some() || self.aggressive {
            let body = function
                .body
                .as_ref()
                .map_or(FunctionBody::Missing, FunctionBody::of_block);
            self.push(function.span, name, role, body, contains_translation_call(function));
        }

        self.depth += 1;
        function.visit_children_with(self);
        self.depth -= 1;
    }

    fn enter_arrow(&mut self, arrow: &ArrowExpr, name: Option<String>) {
        let role = self.role_for(name.as_deref(), || contains_jsx(&*arrow.body));

        if role.is_some() || self.aggressive {
            let body = match &*arrow.body {
                BlockStmtOrExpr::BlockStmt(block) => FunctionBody::of_block(block),
                BlockStmtOrExpr::Expr(expr) => FunctionBody::Expr { span: expr.span() },
            };
            self.push(arrow.span, name, role, body, contains_translation_call(arrow));
        }

        self.depth += 1;
        arrow.visit_children_with(self);
        self.depth -= 1;
    }
}

impl Visit for ContextFinder {
    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.enter_function(&node.function, Some(node.ident.sym.to_string()));
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        let name = node.ident.as_ref().map(|ident| ident.sym.to_string());
        self.enter_function(&node.function, name);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.enter_arrow(node, None);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        node.name.visit_with(self);

        let Some(init) = &node.init else {
            return;
        };
        match unparen(init) {
            Expr::Arrow(arrow) => self.enter_arrow(arrow, binding_name(&node.name)),
            Expr::Fn(fn_expr) => {
                let name = fn_expr
                    .ident
                    .as_ref()
                    .map(|ident| ident.sym.to_string())
                    .or_else(|| binding_name(&node.name));
                self.enter_function(&fn_expr.function, name);
            }
            _ => init.visit_with(self),
        }
    }
}
