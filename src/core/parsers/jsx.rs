use std::sync::Arc;

use swc_common::{
    FileName, GLOBALS, Globals, SourceMap, Spanned, comments::SingleThreadedComments,
};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, error::Error as SwcError};

use crate::core::{error::ParseError, tree::SourceTree};

/// Parse JSX/TSX source code into a [`SourceTree`].
///
/// Every call gets its own `SourceMap` and swc globals, so files can be parsed
/// on any rayon worker. Diagnostics the parser recovers from still fail the
/// file: rewriting a tree the parser had to guess at is not safe.
pub fn parse_source(code: String, file_path: &str) -> Result<SourceTree, ParseError> {
    let source_map = Arc::new(SourceMap::default());

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser
            .parse_module()
            .map_err(|e| to_parse_error(&source_map, &e))?;

        if let Some(first) = parser.take_errors().first() {
            return Err(to_parse_error(&source_map, first));
        }

        Ok(SourceTree::new(file_path.to_string(), module, code, source_file.start_pos))
    })
}

fn to_parse_error(source_map: &SourceMap, error: &SwcError) -> ParseError {
    let loc = source_map.lookup_char_pos(error.span().lo);
    ParseError {
        line: loc.line,
        column: loc.col_display + 1,
        message: error.kind().msg().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsx() {
        let code = r#"
type Props = { name: string };
export const Hello = ({ name }: Props) => <p>안녕 {name}</p>;
"#;
        let tree = parse_source(code.to_string(), "hello.tsx").unwrap();
        assert_eq!(tree.module.body.len(), 2);
        assert_eq!(tree.path(), "hello.tsx");
        assert_eq!(tree.print(), code);
    }

    #[test]
    fn test_parse_error_has_location() {
        let code = "const a = 1;\nconst b = = 2;\n";
        let Err(err) = parse_source(code.to_string(), "broken.tsx") else {
            panic!("expected a parse error");
        };
        assert_eq!(err.line, 2);
        assert!(err.column > 1, "column should point into line 2: {err}");
        assert!(!err.message.is_empty());
    }
}
