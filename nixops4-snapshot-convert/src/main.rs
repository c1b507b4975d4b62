mod logging;

use anyhow::{Context, Result};
use clap::{ColorChoice, CommandFactory as _, Parser};
use nixops4_snapshot_convert::{convert_directory, Mode, NotADirectory};
use std::path::PathBuf;
use std::process::exit;

fn main() {
    let args = Args::parse();
    handle_result(run_args(args));
}

fn run_args(args: Args) -> Result<()> {
    if args.generate_man {
        let cmd = Args::command();
        let man = clap_mangen::Man::new(cmd);
        let mut buffer: Vec<u8> = Default::default();
        man.render(&mut buffer)?;
        println!("{}", String::from_utf8(buffer)?);
        return Ok(());
    }
    if args.generate_markdown {
        let opts = clap_markdown::MarkdownOptions::new().show_footer(false);
        let markdown: String = clap_markdown::help_markdown_custom::<Args>(&opts);
        println!("{}", markdown);
        return Ok(());
    }
    if let Some(shell) = args.generate_completion {
        let mut cmd = Args::command();
        clap_complete::generate(
            shell,
            &mut cmd,
            "nixops4-snapshot-convert",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    logging::set_up(&logging::Options::new(
        args.options.verbose,
        args.options.color,
    ))?;

    // clap enforces this unless a generate-* flag was given
    let dir = args
        .modules_directory
        .context("missing modules directory argument")?;
    let mode = if args.options.dry_run {
        Mode::DryRun
    } else {
        Mode::Write
    };
    convert_directory(&dir, mode)?;
    Ok(())
}

fn handle_result(r: Result<()>) {
    match r {
        Ok(()) => {}
        Err(e) => {
            if let Some(e) = e.downcast_ref::<NotADirectory>() {
                eprintln!("error: {}", e);
            } else {
                eprintln!("nixops4-snapshot-convert error: {:?}", e);
            }
            exit(1);
        }
    }
}

/// Move the top-level `config` of each Nix module in a directory to `config.snapshot.<module name>`
///
/// Expects `nixfmt`-formatted modules. Files without a recognizable
/// top-level `config = ` assignment are left alone.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the `*.nix` modules to convert (not recursive)
    #[arg(required_unless_present_any = ["generate_man", "generate_markdown", "generate_completion"])]
    modules_directory: Option<PathBuf>,

    #[command(flatten)]
    options: Options,

    /// Generate a manpage for nixops4-snapshot-convert
    #[arg(long, hide = true)]
    generate_man: bool,

    /// Generate markdown documentation for nixops4-snapshot-convert
    #[arg(long, hide = true)]
    generate_markdown: bool,

    /// Generate shell completion for nixops4-snapshot-convert
    #[arg(long, hide = true, value_name = "SHELL")]
    generate_completion: Option<clap_complete::Shell>,
}

#[derive(Parser, Debug, Clone)]
struct Options {
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[arg(long, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Report what would be converted, without writing any files
    #[arg(short = 'n', long, default_value_t = false)]
    dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn test_args_debug_assert() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_directory() {
        let args = Args::try_parse_from(["nixops4-snapshot-convert", "-n", "modules"]).unwrap();
        assert_eq!(args.modules_directory, Some(PathBuf::from("modules")));
        assert!(args.options.dry_run);
        assert!(!args.options.verbose);
    }

    #[test]
    fn test_directory_required() {
        let err = Args::try_parse_from(["nixops4-snapshot-convert"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_too_many_arguments() {
        let err = Args::try_parse_from(["nixops4-snapshot-convert", "a", "b"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_generate_man_needs_no_directory() {
        let args = Args::try_parse_from(["nixops4-snapshot-convert", "--generate-man"]).unwrap();
        assert!(args.generate_man);
        assert_eq!(args.modules_directory, None);
    }
}
