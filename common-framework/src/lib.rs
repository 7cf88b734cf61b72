//! Common Framework
//!
//! Shared building blocks for lexer-framework and parser-framework: source
//! coordinates, spans and shared text slices.

pub mod position;
pub mod span;
pub mod text_slice;

pub use position::Position;
pub use span::Span;
pub use text_slice::TextSlice;
