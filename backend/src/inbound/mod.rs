//! Inbound adapters that translate operator intent into store and engine
//! calls while keeping rendering details at the edge.
//!
//! The admin table is driven through [`screen`]; [`presentation`] holds the
//! pure helpers a renderer uses to turn a row into labels.

pub mod presentation;
pub mod screen;

pub use screen::{DirectoryRow, DirectoryScreen, DirectoryView, ScreenCommand, ScreenEffect};
