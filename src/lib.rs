//! auto-i18n - internationalization codemod for React sources
//!
//! auto-i18n finds natural-language text in JS/TS/JSX/TSX files, wraps it in
//! `t(...)` calls, injects `useTranslation` hooks and imports where they are
//! needed, and extracts translation catalogs.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, context finding, wrapping, scaffolding, extraction
//!   and catalog output

pub mod cli;
pub mod config;
pub mod core;
