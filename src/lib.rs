pub mod board;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod geometry;
pub mod glyph;
pub mod protocol;
pub mod render;
pub mod surface;
pub mod svg;
