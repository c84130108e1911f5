//! The codemod engine.
//!
//! A file goes through [`parsers`] into a [`tree::SourceTree`], then
//! [`finder`] locates translation contexts, [`wrapper`] wraps text,
//! [`insertion`] adds hooks and imports and [`extractor`] collects the
//! catalog entries. All edits live in a [`rewrite::RewriteSet`] and are
//! applied when the tree is printed. [`pipeline`] runs this over many files.

pub mod catalog;
pub mod error;
pub mod extractor;
pub mod file_scanner;
pub mod finder;
pub mod insertion;
pub mod language;
pub mod parsers;
pub mod pipeline;
pub mod rewrite;
pub mod template;
pub mod tree;
pub mod utils;
pub mod wrapper;
