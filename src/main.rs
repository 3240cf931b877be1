use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use theme_dev_tools::category::FileCategory;
use theme_dev_tools::commands::{Outcome, copy, find};
use theme_dev_tools::config::Config;
use theme_dev_tools::console::TerminalConsole;
use theme_dev_tools::fs::LocalFilesystem;
use theme_dev_tools::output;
use theme_dev_tools::theme::ProjectThemeRegistry;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
	name = "theme-dev-tools",
	about = "Theme Dev Tools - Copy and search files across storefront themes",
	long_about = "theme-dev-tools works on the themes installed in a Shopware project. \
                  `copy` moves a single Twig template or SCSS file from one theme to \
                  another; `find` searches a theme's templates, stylesheets or scripts \
                  for a string or regular expression.",
	version
)]
struct Cli {
	/// Project root holding the installed themes (defaults to
	/// $THEME_DEV_TOOLS_PROJECT, then the current directory).
	#[arg(long, global = true)]
	project: Option<PathBuf>,
	/// Log internal diagnostics to stderr.
	#[arg(long, short = 'v', global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Transfer .twig and .scss files between theme plugins.
	Copy,
	/// Search theme plugin .twig, .scss and .js files for a substring.
	///
	/// Input wrapped in slashes (`/^foo/`) is a regular expression; anything
	/// else is matched literally.
	Find {
		/// File type to search. If omitted, you are asked for it.
		#[arg(value_enum)]
		filetype: Option<FileCategory>,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(Outcome::Completed | Outcome::Cancelled) => ExitCode::SUCCESS,
		Err(err) => {
			output::error(&err.to_string());
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
	let config = Config::load(cli.project.as_deref())?;
	let registry = ProjectThemeRegistry::new(&config.project_root);
	let fs = LocalFilesystem;
	let mut console = TerminalConsole;

	let outcome = match cli.command {
		Command::Copy => copy::run(&registry, &fs, &mut console)?,
		Command::Find { filetype } => find::run(&registry, &fs, &mut console, filetype)?,
	};
	Ok(outcome)
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.without_time()
		.with_target(false)
		.init();
}
