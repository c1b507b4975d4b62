use crate::subsequence::is_subsequence;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, instrument, trace};

/// The assignment we move, as it appears at the start of a stripped line.
const TARGET_PREFIX: &str = "config = ";
/// The part of the line that is replaced.
const TARGET: &str = "config =";

/// Whether to write changes back to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Write,
    DryRun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The `config` line was rewritten (or would have been, in a dry run).
    Converted,
    /// No top-level `config = ` line was recognized. Normal for aggregator
    /// modules that only contain `imports`.
    Unchanged,
}

/// Approximate nesting by counting lines that start with `{`.
///
/// A `nixfmt`-formatted module has exactly two: the argument set
/// `{ ... }:` and the attribute set that is the module's body. Lines in
/// the body are only considered while we are at the second one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BraceDepth {
    BeforeAnyBrace,
    SeenOneBrace,
    SeenTwoBraces,
    PastTopLevel,
}

impl BraceDepth {
    fn next(self) -> Self {
        match self {
            BraceDepth::BeforeAnyBrace => BraceDepth::SeenOneBrace,
            BraceDepth::SeenOneBrace => BraceDepth::SeenTwoBraces,
            BraceDepth::SeenTwoBraces | BraceDepth::PastTopLevel => BraceDepth::PastTopLevel,
        }
    }

    fn in_module_body(self) -> bool {
        self == BraceDepth::SeenTwoBraces
    }
}

/// Line scanner state.
struct Scan {
    depth: BraceDepth,
    /// Only relevant if the file has a `let ... in` block at all.
    seen_in: bool,
    has_let_in: bool,
}

impl Scan {
    fn new(lines: &[&str]) -> Self {
        Scan {
            depth: BraceDepth::BeforeAnyBrace,
            seen_in: false,
            has_let_in: is_subsequence(["let", "in"], lines.iter().map(|l| l.trim())),
        }
    }

    /// Feed one line. Returns true if it is the line to rewrite.
    fn is_target(&mut self, line: &str) -> bool {
        if line.starts_with('{') {
            self.depth = self.depth.next();
            trace!(depth = ?self.depth, "top-level brace");
        }

        let stripped = line.trim();
        if !self.seen_in && stripped == "in" {
            debug!("end of let block");
            self.seen_in = true;
            return false;
        }

        (self.seen_in || !self.has_let_in)
            && self.depth.in_module_body()
            && stripped.starts_with(TARGET_PREFIX)
    }
}

/// Split into lines, keeping each line's terminator.
///
/// Only `\n` ends a line. A bare `\r` or other Unicode line separators stay
/// inside the line they appear in.
fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Rewrite the top-level `config = ` line of a module's source to
/// `config.snapshot.<stem> = `.
///
/// Returns `None` if no such line was found. At most one line changes; all
/// other bytes, including line terminators, are preserved.
pub fn rewrite_text(text: &str, stem: &str) -> Option<String> {
    let lines = split_lines(text);
    let mut scan = Scan::new(&lines);

    let idx = lines.iter().position(|line| scan.is_target(line))?;
    debug!(line = idx + 1, "found top-level config");
    let replacement = format!("config.snapshot.{} =", stem);
    let new_line = lines[idx].replacen(TARGET, &replacement, 1);

    let mut out = String::with_capacity(text.len() + replacement.len());
    for line in &lines[..idx] {
        out.push_str(line);
    }
    out.push_str(&new_line);
    for line in &lines[idx + 1..] {
        out.push_str(line);
    }
    Some(out)
}

/// Rewrite a module file in place.
///
/// Prints `Converted <path>` or `No changes made to <path>` to stdout.
#[instrument(name = "convert", level = "debug", skip_all, fields(path = %path.display()))]
pub fn rewrite_file(path: &Path, mode: Mode) -> Result<Outcome> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading module file {}", path.display()))?;
    let stem = path
        .file_stem()
        .with_context(|| format!("module file {} has no file name", path.display()))?
        .to_string_lossy();

    let new_text = match rewrite_text(&text, &stem) {
        Some(new_text) => new_text,
        None => {
            // Not every file needs rewriting, e.g. aggregator modules.
            println!("No changes made to {}", path.display());
            return Ok(Outcome::Unchanged);
        }
    };

    match mode {
        Mode::DryRun => {
            println!("Would convert {}", path.display());
        }
        Mode::Write => {
            println!("Converted {}", path.display());
            std::fs::write(path, new_text)
                .with_context(|| format!("writing module file {}", path.display()))?;
        }
    }
    Ok(Outcome::Converted)
}
