//! File parsers for source code and catalog files.
//!
//! - `json`: catalog JSON reader (existing locale files for merge mode)
//! - `jsx`: JSX/TSX source parser (uses swc for AST generation)

pub mod json;
pub mod jsx;

pub use jsx::parse_source;
