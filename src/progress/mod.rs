//! Progress reporting.
//!
//! A library download shows one main bar counting finished games and one
//! child bar per file in flight. The same display carries the per-game
//! progress lines and the final summary line, so they print above live bars
//! instead of tearing through them.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar display management and line output
//!
//! # Examples
//!
//! ```rust
//! use itchdl::progress::{ProgressBarOpts, StyleOptions};
//!
//! let quiet = StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
//! assert!(!quiet.is_enabled());
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
