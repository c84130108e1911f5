//! Normalized keys for template literals.
//!
//! `` `${user.name}님 ${time}에 만나요` `` becomes the key
//! `{{user.name}}님 {{time}}에 만나요` plus one parameter per distinct
//! interpolation, and is wrapped as
//! `t("{{user.name}}님 {{time}}에 만나요", { "user.name": user.name, "time": time })`.

use swc_common::{Span, Spanned};
use swc_ecma_ast::Tpl;

use super::{
    rewrite::{Piece, SourceText},
    utils::{TRANSLATION_FN, strip_type_casts},
};

/// One interpolation of a template key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParam {
    /// Source text of the expression with type casts removed.
    pub name: String,
    /// Span of the expression with type casts removed.
    pub expr: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateKey {
    pub key: String,
    /// Distinct interpolations in first-seen order.
    pub params: Vec<TemplateParam>,
}

impl TemplateKey {
    pub fn build(tpl: &Tpl, source: &SourceText) -> Self {
        let mut key = String::new();
        let mut params: Vec<TemplateParam> = Vec::new();

        for (i, quasi) in tpl.quasis.iter().enumerate() {
            match quasi.cooked.as_ref().and_then(|cooked| cooked.as_str()) {
                Some(cooked) => key.push_str(cooked),
                None => key.push_str(&quasi.raw),
            }

            let Some(expr) = tpl.exprs.get(i) else {
                continue;
            };
            let expr = strip_type_casts(expr);
            let name = source.slice(expr.span());
            key.push_str("{{");
            key.push_str(name);
            key.push_str("}}");

            if !params.iter().any(|param| param.name == name) {
                params.push(TemplateParam {
                    name: name.to_string(),
                    expr: expr.span(),
                });
            }
        }

        Self { key, params }
    }

    /// Pieces of the `t("key", { "name": expr, ... })` replacement. The
    /// expressions are rendered from source so edits inside them survive.
    pub fn call_pieces(&self) -> Vec<Piece> {
        let mut pieces = vec![Piece::Text(format!(
            "{}({}, {{",
            TRANSLATION_FN,
            quote(&self.key)
        ))];

        for (i, param) in self.params.iter().enumerate() {
            let separator = if i == 0 { " " } else { ", " };
            pieces.push(Piece::Text(format!("{}{}: ", separator, quote(&param.name))));
            pieces.push(Piece::Source(param.expr));
        }

        pieces.push(Piece::Text(
            if self.params.is_empty() { "})" } else { " })" }.to_string(),
        ));
        pieces
    }
}

/// JSON-style double-quoted string literal.
pub fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_ecma_ast::{Expr, ModuleItem, Stmt};

    use super::*;
    use crate::core::parsers::parse_source;

    fn key_of(code: &str) -> TemplateKey {
        let tree = parse_source(code.to_string(), "test.tsx").unwrap();
        let ModuleItem::Stmt(Stmt::Expr(stmt)) = &tree.module.body[0] else {
            panic!("expected expression statement");
        };
        let Expr::Tpl(tpl) = &*stmt.expr else {
            panic!("expected template literal");
        };
        TemplateKey::build(tpl, &tree.source)
    }

    #[test]
    fn test_interleaves_placeholders() {
        let key = key_of("`${user.name}님 ${time}에 만나요`;");
        assert_eq!(key.key, "{{user.name}}님 {{time}}에 만나요");
        let names: Vec<&str> = key.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["user.name", "time"]);
    }

    #[test]
    fn test_repeated_expression_has_one_param() {
        let key = key_of("`${x}와 ${x}`;");
        assert_eq!(key.key, "{{x}}와 {{x}}");
        assert_eq!(key.params.len(), 1);
    }

    #[test]
    fn test_type_casts_are_stripped() {
        let key = key_of("`합계 ${(total as number)} ${id!}`;");
        assert_eq!(key.key, "합계 {{total}} {{id!}}");
    }

    #[test]
    fn test_cooked_escapes() {
        let key = key_of("`첫줄\\n${a}`;");
        assert_eq!(key.key, "첫줄\n{{a}}");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("안녕"), "\"안녕\"");
        assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }
}
