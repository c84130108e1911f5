//! Scaffolding for wrapped text: block bodies, hook statements and imports.
//!
//! The three steps run in order and can also be called one by one:
//!
//! 1. [`Inserter::normalize_blocks`] turns implicit-return arrow bodies of
//!    function contexts into `{ return <expr>; }`.
//! 2. [`Inserter::inject_hooks`] puts `const { t } = useTranslation();` at the
//!    top of top-level components and hooks that call `t`. Only with the hook
//!    convention, and never in aggressive mode.
//! 3. [`Inserter::insert_imports`] extends an existing import from the
//!    translation module, or adds a new one before the first import. It
//!    fails when another import already binds the name.
//!
//! Every step is idempotent: markers in the rewrite table and the shape of
//! the parsed source both prevent a second hook or specifier.

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    Expr, ImportDecl, ImportSpecifier, Lit, Module, ModuleDecl, ModuleExportName, ModuleItem, Stmt,
};

use super::{
    error::{InsertionError, InsertionPhase, ScaffoldError},
    finder::{FunctionBody, FunctionContext, TranslationContext},
    rewrite::RewriteSet,
    template::quote,
    tree::SourceTree,
    utils::{HOOK_STATEMENT, TRANSLATION_FN, TRANSLATION_HOOK},
};

#[derive(Debug, Clone, Copy)]
pub struct InsertOptions<'a> {
    /// Module that exports `t` and `useTranslation`.
    pub module_source: &'a str,
    /// Acquire `t` through the hook instead of importing it directly.
    pub use_hook: bool,
    pub aggressive: bool,
}

pub struct Inserter<'a> {
    contexts: &'a [TranslationContext],
    options: InsertOptions<'a>,
}

impl<'a> Inserter<'a> {
    pub fn new(contexts: &'a [TranslationContext], options: InsertOptions<'a>) -> Self {
        Self { contexts, options }
    }

    pub fn insert(&self, tree: &mut SourceTree) -> Result<(), InsertionError> {
        self.normalize_blocks(tree);
        self.inject_hooks(tree)?;
        self.insert_imports(tree)
    }

    fn functions(&self) -> impl Iterator<Item = &'a FunctionContext> + 'a {
        self.contexts.iter().filter_map(|context| match context {
            TranslationContext::Function(function) => Some(function),
            TranslationContext::ModuleScope(_) => None,
        })
    }

    // ============================================================
    // Step 1: block normalization
    // ============================================================

    pub fn normalize_blocks(&self, tree: &mut SourceTree) {
        for function in self.functions() {
            if let FunctionBody::Expr { span } = function.body {
                tree.rewrites.normalize_body(span);
            }
        }
    }

    // ============================================================
    // Step 2: hook injection
    // ============================================================

    pub fn inject_hooks(&self, tree: &mut SourceTree) -> Result<(), InsertionError> {
        if !self.options.use_hook || self.options.aggressive {
            return Ok(());
        }

        for function in self.functions() {
            if function.role.is_none()
                || !function.top_level
                || tree.rewrites.is_hooked(function.span)
                || !has_call(function, &tree.rewrites)
            {
                continue;
            }

            let (pos, text) = match &function.body {
                FunctionBody::Block {
                    starts_with_hook: true,
                    ..
                } => continue,
                FunctionBody::Block {
                    first_stmt: Some(stmt),
                    ..
                } => {
                    let separator = match tree.source.line_indent(stmt.lo) {
                        Some(indent) => format!("\n{}", indent),
                        None => " ".to_string(),
                    };
                    (stmt.lo, format!("{}{}", HOOK_STATEMENT, separator))
                }
                FunctionBody::Block {
                    span,
                    first_stmt: None,
                    ..
                } => (BytePos(span.lo.0 + 1), format!(" {} ", HOOK_STATEMENT)),
                FunctionBody::Expr { span } if tree.rewrites.is_normalized(*span) => {
                    (span.lo, format!("{} ", HOOK_STATEMENT))
                }
                FunctionBody::Expr { .. } | FunctionBody::Missing => {
                    return Err(InsertionError::new(
                        InsertionPhase::HookInjection,
                        ScaffoldError::StructuralInvariantViolation {
                            context: function
                                .name
                                .clone()
                                .unwrap_or_else(|| "<anonymous>".to_string()),
                        },
                    ));
                }
            };

            tree.rewrites.inject_hook(function.span, pos, text);
        }
        Ok(())
    }

    // ============================================================
    // Step 3: import declaration
    // ============================================================

    pub fn insert_imports(&self, tree: &mut SourceTree) -> Result<(), InsertionError> {
        let (needs_t, needs_hook) = self.analyze_import_needs(&tree.rewrites);

        let wanted: Vec<&str> = [(needs_hook, TRANSLATION_HOOK), (needs_t, TRANSLATION_FN)]
            .into_iter()
            .filter_map(|(needed, identifier)| needed.then_some(identifier))
            .collect();
        if wanted.is_empty() {
            return Ok(());
        }

        let SourceTree {
            module, rewrites, ..
        } = tree;
        let existing = find_existing_import(module, self.options.module_source);

        let missing: Vec<&str> = wanted
            .into_iter()
            .filter(|identifier| !rewrites.is_imported(identifier))
            .filter(|identifier| {
                existing.is_none_or(|import| !has_identifier_import(import, identifier))
            })
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        for identifier in &missing {
            if let Some(import) = find_local_binding(module, identifier) {
                return Err(InsertionError::new(
                    InsertionPhase::ImportInsertion,
                    ScaffoldError::BindingConflict {
                        identifier: identifier.to_string(),
                        source_module: quote(import.src.value.as_str().unwrap_or_default()),
                    },
                ));
            }
        }

        let extended = existing.is_some_and(|import| extend_import(import, &missing, rewrites));
        if !extended {
            let declaration = format!(
                "import {{ {} }} from {};\n",
                missing.join(", "),
                quote(self.options.module_source)
            );
            rewrites.insert_import(import_position(module), declaration);
        }

        for identifier in missing {
            rewrites.mark_imported(identifier);
        }
        Ok(())
    }

    /// Which of `t` and `useTranslation` the file needs, as `(t, hook)`.
    fn analyze_import_needs(&self, rewrites: &RewriteSet) -> (bool, bool) {
        let any_call = || {
            self.contexts.iter().any(|context| match context {
                TranslationContext::Function(function) => has_call(function, rewrites),
                TranslationContext::ModuleScope(module) => {
                    module.has_translation_call || rewrites.has_wrap_within(module.span)
                }
            })
        };

        match (self.options.aggressive, self.options.use_hook) {
            (true, true) => {
                // Components and hooks use the hook. Everything else,
                // including module-level code, calls the bare function.
                let needs_hook = self
                    .functions()
                    .any(|function| function.role.is_some() && has_call(function, rewrites));
                let plain_functions = self
                    .functions()
                    .any(|function| function.role.is_none() && has_call(function, rewrites));
                let module_level = self.contexts.iter().any(|context| match context {
                    TranslationContext::ModuleScope(module) => {
                        module.has_module_level_call || rewrites.has_module_level_wrap()
                    }
                    TranslationContext::Function(_) => false,
                });
                (plain_functions || module_level, needs_hook)
            }
            (true, false) | (false, false) => (any_call(), false),
            (false, true) => (false, any_call()),
        }
    }
}

/// Calls `t` in the parsed source or has a pending wrap.
fn has_call(function: &FunctionContext, rewrites: &RewriteSet) -> bool {
    function.has_translation_call || rewrites.has_wrap_within(function.span)
}

fn find_existing_import<'m>(module: &'m Module, source: &str) -> Option<&'m ImportDecl> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import))
            if !import.type_only && import.src.value.as_str() == Some(source) =>
        {
            Some(import)
        }
        _ => None,
    })
}

fn has_identifier_import(import: &ImportDecl, identifier: &str) -> bool {
    import.specifiers.iter().any(|specifier| match specifier {
        ImportSpecifier::Named(named) => match &named.imported {
            Some(ModuleExportName::Ident(ident)) => ident.sym == identifier,
            Some(ModuleExportName::Str(s)) => s.value.as_str() == Some(identifier),
            None => named.local.sym == identifier,
        },
        _ => false,
    })
}

/// Import declaration that already binds `local`, under any imported name.
fn find_local_binding<'m>(module: &'m Module, local: &str) -> Option<&'m ImportDecl> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) if binds_local(import, local) => {
            Some(import)
        }
        _ => None,
    })
}

fn binds_local(import: &ImportDecl, local: &str) -> bool {
    import.specifiers.iter().any(|specifier| {
        let ident = match specifier {
            ImportSpecifier::Named(named) => &named.local,
            ImportSpecifier::Default(default) => &default.local,
            ImportSpecifier::Namespace(namespace) => &namespace.local,
        };
        ident.sym == local
    })
}

/// Append specifiers to an existing import. Returns false when the import
/// has no room for named specifiers (`import * as i18n` or a bare
/// side-effect import), in which case a new declaration is needed.
fn extend_import(import: &ImportDecl, identifiers: &[&str], rewrites: &mut RewriteSet) -> bool {
    let last_named = import
        .specifiers
        .iter()
        .rev()
        .find(|specifier| matches!(specifier, ImportSpecifier::Named(_)));
    if let Some(last) = last_named {
        rewrites.insert_import(last.span().hi, format!(", {}", identifiers.join(", ")));
        return true;
    }

    match import.specifiers.as_slice() {
        [ImportSpecifier::Default(default)] => {
            rewrites.insert_import(
                default.span.hi,
                format!(", {{ {} }}", identifiers.join(", ")),
            );
            true
        }
        _ => false,
    }
}

/// Before the first import, else before the first statement that is not a
/// directive.
fn import_position(module: &Module) -> BytePos {
    let first_import = module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import.span.lo),
        _ => None,
    });
    if let Some(pos) = first_import {
        return pos;
    }

    module
        .body
        .iter()
        .find(|item| !is_directive(item))
        .map_or(module.span.lo, |item| item.span().lo)
}

fn is_directive(item: &ModuleItem) -> bool {
    match item {
        ModuleItem::Stmt(Stmt::Expr(stmt)) => {
            matches!(&*stmt.expr, Expr::Lit(Lit::Str(_)))
        }
        _ => false,
    }
}
