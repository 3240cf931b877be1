//! One module per subcommand. Each `run` drives a whole interactive flow and
//! reports whether it finished or the user backed out.

pub mod copy;
pub mod find;

use crate::console::{Console, Menu, Selection};
use crate::error::{Error, Result};
use crate::theme::{ThemeDescriptor, ThemeRegistry, list_themes};

pub const CANCELLED_MESSAGE: &str = "Command cancelled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Completed,
	Cancelled,
}

fn load_themes(registry: &dyn ThemeRegistry) -> Result<Vec<ThemeDescriptor>> {
	let themes = list_themes(registry)?;
	if themes.is_empty() {
		return Err(Error::NoThemes);
	}
	Ok(themes)
}

fn choose_theme<'t>(
	console: &mut dyn Console,
	themes: impl IntoIterator<Item = &'t ThemeDescriptor>,
	question: &str,
) -> Result<Option<&'t ThemeDescriptor>> {
	let menu = themes
		.into_iter()
		.fold(Menu::new(), |menu, theme| {
			menu.item(theme.technical_name.as_str(), theme)
		})
		.cancel();
	match menu.prompt(console, question)? {
		Selection::Item(theme) => Ok(Some(theme)),
		Selection::Back | Selection::Cancel => Ok(None),
	}
}

fn cancelled(console: &mut dyn Console) -> Result<Outcome> {
	console.text(CANCELLED_MESSAGE);
	Ok(Outcome::Cancelled)
}
