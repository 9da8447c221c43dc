//! JSON rendering for gentable
//!
//! Turns a [`Table`](gentable_core::Table), [`List`](gentable_core::List) or
//! single [`Value`](gentable_core::Value) into JSON text, either compact or
//! indented. Rendering is one-way; there is no parser.

#![warn(clippy::all)]

pub mod escape;
pub mod render;

pub use escape::EscapeMode;
pub use render::{render, render_with, JsonWriter, RenderOptions, ToJson};
