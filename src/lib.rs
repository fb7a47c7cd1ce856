//! # hyprparser
//!
//! Load, query and edit Hyprland configuration files without disturbing their layout.
//!
//! A [`Session`] reads the root config and every file it pulls in through `source`,
//! decodes settings into typed [`Value`]s and collects monitors, binds, variables,
//! env entries, exec lines and bezier curves into a [`Document`].
//!
//! Edits go straight into the original line buffers. The line that owns an option
//! is found again from the current text on every change, so only that line (or the
//! newly inserted one) differs when the files are written back.
//!
//! ## Example
//!
//! ```rust
//! use hyprparser::{MemoryFs, Session, SessionOptions, LooseCoder, Setting, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFs::new().with_file(
//!     "/home/me/.config/hypr/hyprland.conf",
//!     "general {\n    gaps_in = 5\n}\ninput {\n    kb_layout = us\n}\n",
//! );
//!
//! let mut session = Session::load_with(
//!     "/home/me/.config/hypr/hyprland.conf",
//!     SessionOptions::default(),
//!     fs.clone(),
//!     LooseCoder,
//! )?;
//!
//! assert_eq!(session.get_value("general:gaps_in"), Some(&Value::Int(5)));
//!
//! session.set_option("general:gaps_in", 10)?;
//! session.new_option(Setting::new("input:numlock_by_default", true))?;
//! session.save_all()?;
//!
//! assert_eq!(
//!     fs.content("/home/me/.config/hypr/hyprland.conf").unwrap(),
//!     "general {\n    gaps_in = 10\n}\ninput {\n    numlock_by_default = true\n    kb_layout = us\n}\n"
//! );
//! # Ok(())
//! # }
//! ```

mod coder;
mod directives;
mod document;
mod error;
mod expand;
mod fs;
mod line;
mod loader;
mod locator;
mod session;
mod sources;
mod synthesizer;
mod types;

// Public API exports
pub use coder::{parse_bool, LooseCoder, ValueCoder};
pub use directives::{Bezier, Binding, Env, Exec, Monitor, Setting, Variable};
pub use document::Document;
pub use error::{ConfigError, ParseResult};
pub use fs::{DiskFs, FileSystem, MemoryFs};
pub use session::{Record, Session, SessionOptions, DEFAULT_CONFIG_PATH};
pub use sources::{FileId, SourceFile, SourceGraph};
pub use types::{Color, Gradient, Value};

// Lower-level building blocks
pub use expand::{expand_env, expand_tilde, expand_with};
pub use line::{classify, normalize, walk, LineEvent, LineKind, SectionStack};
pub use locator::{locate, locate_path, split_path, Location};
pub use synthesizer::ensure_sections;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
