use crate::category::FileCategory;
use crate::commands::{Outcome, cancelled, choose_theme, load_themes};
use crate::console::{Console, Menu, Selection};
use crate::error::Result;
use crate::fs::Filesystem;
use crate::search::{Pattern, search};
use crate::theme::ThemeRegistry;

pub const DESCRIPTION: &str = "Search theme plugin .twig, .scss and .js files for substring";

pub const SEARCH_QUESTION: &str = "Enter search string or regular expression (delimit with '/')";

/// Search one theme. `filetype` skips the file type prompt when given.
pub fn run(
	registry: &dyn ThemeRegistry,
	fs: &dyn Filesystem,
	console: &mut dyn Console,
	filetype: Option<FileCategory>,
) -> Result<Outcome> {
	console.title(&format!("Theme Dev Tools FIND: {DESCRIPTION}"));

	let themes = load_themes(registry)?;
	let Some(theme) = choose_theme(console, &themes, "Select the theme to search")? else {
		return cancelled(console);
	};

	let category = match filetype {
		Some(category) => category,
		None => {
			let menu = FileCategory::SEARCHABLE
				.into_iter()
				.fold(Menu::new(), |menu, category| {
					menu.item(category.search_extension(), category)
				})
				.cancel();
			match menu.prompt(console, "Which filetypes do you want to search?")? {
				Selection::Item(category) => category,
				Selection::Back | Selection::Cancel => return cancelled(console),
			}
		}
	};

	let input = console.ask(SEARCH_QUESTION)?;
	let pattern = Pattern::parse(&input)?;

	let mut results = search(fs, &theme.base_path, category, &pattern)?;
	let mut matched = 0;
	for file in results.by_ref() {
		console.report_matches(&file);
		matched += 1;
	}
	tracing::debug!(
		root = %results.root().display(),
		scanned = results.scanned(),
		skipped = results.skipped(),
		matched,
		"search finished"
	);
	console.text(&format!("{matched} file(s) matched"));
	Ok(Outcome::Completed)
}
