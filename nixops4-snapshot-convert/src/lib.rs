//! Move the top-level `config` of Nix modules under `config.snapshot.<name>`.
//!
//! This is a migration helper, not a Nix parser. It assumes `nixfmt`-style
//! formatting and recognizes the assignment by line shape alone:
//!
//! ```nix
//! { lib, ... }:
//! let
//!   x = 1;
//! in
//! {
//!   config = {
//!     # ...
//!   };
//! }
//! ```
//!
//! becomes `config.snapshot.<name> = {` in a file named `<name>.nix`.
//! Nested or multiple `let ... in` blocks and scoping are not understood.

pub mod driver;
pub mod rewrite;
pub mod subsequence;

pub use driver::{convert_directory, module_files, NotADirectory, Summary};
pub use rewrite::{rewrite_file, rewrite_text, Mode, Outcome};
