//! HTML renderer.
//!
//! Turns a node tree into a markup string. Handlers met along the way are
//! collected into the pass handler table.

mod escape;
mod html;

pub use escape::{escape, escape_text, kebab_case};
pub use html::{serialize, style_declarations, HtmlSerializer};
