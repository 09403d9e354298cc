mod commands;
mod core;
mod release;

use clap::{Parser, Subcommand};
use crate::core::error::{BumpError, print_error};
use release::Part;

/// Bump a bundle's version, update its changelog, commit and tag
#[derive(Parser)]
#[command(name = "bundle-bump")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct BumpCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bump the major version (1.9 -> 2.0)
  Major,
  /// Bump the minor version (1.4 -> 1.5)
  Minor,
  /// Bump the patch version (2.0.3 -> 2.0.4)
  Patch,
  #[command(external_subcommand)]
  Other(Vec<String>),
}

impl Commands {
  fn part(&self) -> Result<Part, BumpError> {
    match self {
      Commands::Major => Ok(Part::Major),
      Commands::Minor => Ok(Part::Minor),
      Commands::Patch => Ok(Part::Patch),
      Commands::Other(args) => args.first().map(String::as_str).unwrap_or_default().parse(),
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = BumpCli::parse();

  // Reject unknown parts before touching the repository
  let part = match cli.command.part() {
    Ok(part) => part,
    Err(e) => handle_error(e),
  };

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(2);
    }
  };

  let ctx = match crate::core::context::RepoContext::build(&cwd) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  if let Err(err) = commands::run_bump(&ctx, part) {
    handle_error(err);
  }
}

fn handle_error(err: BumpError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
