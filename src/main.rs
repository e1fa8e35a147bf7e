//! cdoc: generate Doxygen comment blocks for C declarations.
//!
//! Three commands, each reading FILE or stdin:
//!
//! - `cdoc doc --line 12 list.h`: comment the declaration starting on line 12
//! - `cdoc header list.c`: file header template
//! - `cdoc group --line 3 --full list.h`: wrap a run of similar lines in a group
//!
//! `--write` applies the edit in place (or prints the edited document when
//! reading stdin).

mod output;

use anyhow::{bail, Context, Result};
use cdoc::edit;
use cdoc::group::{find_group, render_group};
use cdoc::render::header::render_header;
use cdoc::{analyze_declaration, line_start, render, Invalid, RenderConfig, TagLead};
use clap::{Args, Parser, Subcommand};
use output::{create_formatter, Report};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for a declaration that could not be documented.
const EXIT_INVALID: u8 = 2;

#[derive(Parser)]
#[command(
    name = "cdoc",
    about = "Generate Doxygen comment blocks for C declarations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Introduce tags with `\` instead of `@`
    #[arg(long, global = true, env = "CDOC_BACKSLASH")]
    backslash: bool,

    /// Placeholder text for anything that cannot be described
    #[arg(long, global = true, env = "CDOC_DEFAULT_TEXT", default_value = "TODO")]
    default_text: String,

    /// Leave out the details section of function and header blocks
    #[arg(long, global = true, env = "CDOC_NO_DETAILS")]
    no_details: bool,

    /// Write details as an empty line plus text instead of a tagged line
    #[arg(long, global = true, env = "CDOC_BLANK_DETAILS")]
    blank_details: bool,

    /// Output format: text (default), json
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: String,
}

#[derive(Subcommand)]
enum Command {
    /// Comment the declaration starting on a line
    Doc(Target),
    /// Print or prepend a file header template
    Header {
        /// File name written after the file tag (defaults to FILE's name)
        #[arg(long)]
        name: Option<String>,

        /// Prepend the header to FILE
        #[arg(short = 'w', long)]
        write: bool,

        /// Source file. If omitted, reads from stdin.
        file: Option<PathBuf>,
    },
    /// Wrap the lines sharing the first token of a line in a named group
    Group(Target),
}

#[derive(Args)]
struct Target {
    /// 1-based line the declaration or group starts on
    #[arg(short = 'l', long)]
    line: usize,

    /// Also add aligned trailing comments to members or group rows
    #[arg(long)]
    full: bool,

    /// Apply the edit to FILE (or print the edited document for stdin)
    #[arg(short = 'w', long)]
    write: bool,

    /// Source file. If omitted, reads from stdin.
    file: Option<PathBuf>,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            tag_lead: if self.backslash {
                TagLead::Backslash
            } else {
                TagLead::At
            },
            default_text: self.default_text.clone(),
            details: !self.no_details,
            blank_details: self.blank_details,
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Doc(target) => doc(&cli, target),
        Command::Group(target) => group(&cli, target),
        Command::Header { name, write, file } => {
            header(&cli, name.as_deref(), *write, file.as_deref())
        }
    }
}

/// `cdoc doc`: analyze, render and either report or apply the edit.
fn doc(cli: &Cli, target: &Target) -> Result<ExitCode> {
    let formatter = create_formatter(&cli.format)?;
    let source = read_source(target.file.as_deref())?;
    let offset = offset_of(&source, target.line)?;
    let config = cli.render_config();

    let analysis = match analyze_declaration(&source, offset, target.full) {
        Ok(analysis) => analysis,
        Err(reason) => return rejected(formatter.invalid(reason)?, reason),
    };
    let rendered = render(&analysis.declaration, &config);

    if target.write {
        let edited = edit::apply(&source, &analysis.plan, &rendered);
        write_source(target.file.as_deref(), &edited)?;
        return Ok(ExitCode::SUCCESS);
    }

    let report = Report {
        kind: Some(analysis.declaration.kind()),
        declaration: Some(&analysis.declaration),
        group: None,
        plan: Some(&analysis.plan),
        rendered: &rendered,
        preview: edit::preview(&source, &analysis.plan, &rendered),
    };
    print!("{}", formatter.report(&report)?);
    Ok(ExitCode::SUCCESS)
}

/// `cdoc group`: delimit the run of lines sharing a first token.
fn group(cli: &Cli, target: &Target) -> Result<ExitCode> {
    let formatter = create_formatter(&cli.format)?;
    let source = read_source(target.file.as_deref())?;
    if target.line == 0 {
        bail!("--line is 1-based");
    }
    let config = cli.render_config();

    let group = match find_group(&source, target.line - 1) {
        Ok(group) => group,
        Err(reason) => return rejected(formatter.invalid(reason)?, reason),
    };
    let rendered = render_group(&group, target.full, &config);

    if target.write {
        let edited = edit::apply(&source, &group.plan, &rendered);
        write_source(target.file.as_deref(), &edited)?;
        return Ok(ExitCode::SUCCESS);
    }

    let report = Report {
        kind: None,
        declaration: None,
        group: Some(&group),
        plan: None,
        rendered: &rendered,
        preview: edit::preview(&source, &group.plan, &rendered),
    };
    print!("{}", formatter.report(&report)?);
    Ok(ExitCode::SUCCESS)
}

/// `cdoc header`: print the header template, or prepend it to the file.
fn header(cli: &Cli, name: Option<&str>, write: bool, file: Option<&Path>) -> Result<ExitCode> {
    let formatter = create_formatter(&cli.format)?;
    let file_name = match (name, file) {
        (Some(name), _) => name.to_string(),
        (None, Some(path)) => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("no file name in {}", path.display()))?,
        (None, None) => bail!("--name is required when reading stdin"),
    };
    let text = render_header(&file_name, &cli.render_config());

    if write {
        let source = read_source(file)?;
        let edited = if source.is_empty() {
            format!("{text}\n")
        } else {
            format!("{text}\n\n{source}")
        };
        write_source(file, &edited)?;
        return Ok(ExitCode::SUCCESS);
    }

    let rendered = cdoc::Rendered {
        text: text.clone(),
        ..Default::default()
    };
    let report = Report {
        kind: None,
        declaration: None,
        group: None,
        plan: None,
        rendered: &rendered,
        preview: text,
    };
    print!("{}", formatter.report(&report)?);
    Ok(ExitCode::SUCCESS)
}

/// Report a rejected declaration; the document is left untouched.
fn rejected(stdout: Option<String>, reason: Invalid) -> Result<ExitCode> {
    tracing::debug!(%reason, "declaration rejected");
    if let Some(text) = stdout {
        print!("{text}");
    }
    eprintln!("cdoc: {reason}");
    Ok(ExitCode::from(EXIT_INVALID))
}

/// Byte offset of 1-based `line`.
fn offset_of(source: &str, line: usize) -> Result<usize> {
    if line == 0 {
        bail!("--line is 1-based");
    }
    line_start(source, line - 1)
        .with_context(|| format!("line {line} is past the end of the input"))
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Write the edited document back to `file`, or to stdout for stdin input.
fn write_source(file: Option<&Path>, text: &str) -> Result<()> {
    match file {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_numbers_are_one_based() {
        let source = "int a;\nint b;\n";
        assert_eq!(offset_of(source, 1).unwrap(), 0);
        assert_eq!(offset_of(source, 2).unwrap(), 7);
        assert!(offset_of(source, 0).is_err());
        assert!(offset_of(source, 9).is_err());
    }

    #[test]
    fn flags_build_the_render_config() {
        let cli = Cli::parse_from([
            "cdoc",
            "--backslash",
            "--no-details",
            "--default-text",
            "FIXME",
            "doc",
            "--line",
            "1",
        ]);
        let config = cli.render_config();
        assert_eq!(config.tag_lead, TagLead::Backslash);
        assert_eq!(config.default_text, "FIXME");
        assert!(!config.details);
        assert!(!config.blank_details);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from(["cdoc", "group", "-l", "3", "--full", "--blank-details"]);
        assert!(cli.blank_details);
        let Command::Group(target) = &cli.command else {
            panic!("expected the group command");
        };
        assert_eq!(target.line, 3);
        assert!(target.full);
        assert!(target.file.is_none());
    }
}
