//! Entry row formatting
//!
//! # Module Structure
//!
//! - `config` - Per-level presentation options derived from the mask
//! - `render` - The row layouts (disk usage, minimal, full)
//! - `utils` - Size and timestamp formatting

mod config;
mod render;
mod utils;

pub use config::Presentation;
pub use render::render_entry;
pub use utils::{format_mod_time, format_size};
