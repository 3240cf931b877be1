//! Console seam between the commands and the terminal.
//!
//! Commands talk to a [`Console`] and build their single-choice prompts with
//! [`Menu`], which reserves the `b` (back) and `q` (cancel) keys.

use owo_colors::OwoColorize;

use crate::error::{Error, Result};
use crate::output;
use crate::search::FileMatches;

pub const BACK_KEY: &str = "b";
pub const CANCEL_KEY: &str = "q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
	pub key: String,
	pub label: String,
	/// Rendered in a distinct color (files in the picker).
	pub emphasis: bool,
}

pub trait Console {
	fn title(&mut self, text: &str);

	fn text(&mut self, text: &str);

	/// Location notices such as `You are here: page/product`.
	fn breadcrumb(&mut self, text: &str);

	fn success(&mut self, text: &str);

	/// Ask for one of `options` and return its index.
	fn choice(&mut self, question: &str, options: &[MenuOption]) -> Result<usize>;

	fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

	fn ask(&mut self, question: &str) -> Result<String>;

	fn report_matches(&mut self, file: &FileMatches);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
	Item(T),
	Back,
	Cancel,
}

/// A single-choice prompt whose options map to values of `T`.
#[derive(Debug, Clone)]
pub struct Menu<T> {
	options: Vec<MenuOption>,
	values: Vec<Selection<T>>,
	items: usize,
}

impl<T> Default for Menu<T> {
	fn default() -> Self {
		Self {
			options: Vec::new(),
			values: Vec::new(),
			items: 0,
		}
	}
}

impl<T> Menu<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn item(self, label: impl Into<String>, value: T) -> Self {
		self.push_item(label.into(), value, false)
	}

	pub fn emphasized_item(self, label: impl Into<String>, value: T) -> Self {
		self.push_item(label.into(), value, true)
	}

	pub fn back(self) -> Self {
		self.push(BACK_KEY, "<-- back", false, Selection::Back)
	}

	pub fn cancel(self) -> Self {
		self.push(CANCEL_KEY, "cancel", false, Selection::Cancel)
	}

	pub fn options(&self) -> &[MenuOption] {
		&self.options
	}

	pub fn prompt(self, console: &mut dyn Console, question: &str) -> Result<Selection<T>> {
		let index = console.choice(question, &self.options)?;
		self.values.into_iter().nth(index).ok_or_else(|| {
			Error::Console(std::io::Error::new(
				std::io::ErrorKind::InvalidInput,
				format!("choice {index} is out of range"),
			))
		})
	}

	fn push_item(self, label: String, value: T, emphasis: bool) -> Self {
		let key = self.items.to_string();
		let mut menu = self.push(&key, &label, emphasis, Selection::Item(value));
		menu.items += 1;
		menu
	}

	fn push(mut self, key: &str, label: &str, emphasis: bool, value: Selection<T>) -> Self {
		self.options.push(MenuOption {
			key: key.to_owned(),
			label: label.to_owned(),
			emphasis,
		});
		self.values.push(value);
		self
	}
}

/// Resolve a reply against a menu: a key wins over a label.
pub fn resolve_reply(reply: &str, options: &[MenuOption]) -> Option<usize> {
	options
		.iter()
		.position(|option| option.key == reply)
		.or_else(|| options.iter().position(|option| option.label == reply))
}

/// Interprets a yes/no reply. Anything unrecognised falls back to `default`.
pub fn parse_confirmation(reply: &str, default: bool) -> bool {
	match reply.to_ascii_lowercase().as_str() {
		"y" | "yes" => true,
		"n" | "no" => false,
		_ => default,
	}
}

/// Interactive stdin/stderr console. Search matches go to stdout.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
	fn title(&mut self, text: &str) {
		output::title(text);
	}

	fn text(&mut self, text: &str) {
		output::text(text);
	}

	fn breadcrumb(&mut self, text: &str) {
		output::breadcrumb(text);
	}

	fn success(&mut self, text: &str) {
		output::success(text);
	}

	fn choice(&mut self, question: &str, options: &[MenuOption]) -> Result<usize> {
		loop {
			output::question(question, None);
			for option in options {
				output::option(&option.key, &option.label, option.emphasis);
			}
			let reply = output::read_reply()?.ok_or(Error::InputClosed)?;
			match resolve_reply(&reply, options) {
				Some(index) => return Ok(index),
				None => output::warn(&format!("Value \"{reply}\" is invalid")),
			}
		}
	}

	fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
		let hint = if default { "(yes/no) [yes]" } else { "(yes/no) [no]" };
		output::question(question, Some(hint));
		let reply = output::read_reply()?.ok_or(Error::InputClosed)?;
		Ok(parse_confirmation(&reply, default))
	}

	fn ask(&mut self, question: &str) -> Result<String> {
		output::question(question, None);
		output::read_reply()?.ok_or(Error::InputClosed)
	}

	fn report_matches(&mut self, file: &FileMatches) {
		output::file_header(&file.display_path());
		for record in &file.records {
			let highlighted = record.highlighted_line(|found| found.yellow().to_string());
			output::match_line(record.line_number, &highlighted);
		}
		output::blank();
	}
}


#[cfg(test)]
mod tests {
	use super::scripted::ScriptedConsole;
	use super::*;

	#[test]
	fn menu_keys_number_items_and_reserve_back_and_cancel() {
		let menu = Menu::new().item("A", 'a').item("B", 'b').back().cancel();
		let keys: Vec<&str> = menu.options().iter().map(|o| o.key.as_str()).collect();
		assert_eq!(keys, ["0", "1", "b", "q"]);
	}

	#[test]
	fn reply_accepts_key_or_label() {
		let menu = Menu::new().item("Storefront", 1).item("0", 2).cancel();
		assert_eq!(resolve_reply("0", menu.options()), Some(0));
		assert_eq!(resolve_reply("Storefront", menu.options()), Some(0));
		assert_eq!(resolve_reply("cancel", menu.options()), Some(2));
		assert_eq!(resolve_reply("nope", menu.options()), None);
	}

	#[test]
	fn prompt_maps_back_and_cancel() {
		let mut console = ScriptedConsole::new(["b", "q", "1"]);
		let menu = || Menu::new().item("x", 10).item("y", 20).back().cancel();
		assert_eq!(menu().prompt(&mut console, "?").unwrap(), Selection::Back);
		assert_eq!(menu().prompt(&mut console, "?").unwrap(), Selection::Cancel);
		assert_eq!(menu().prompt(&mut console, "?").unwrap(), Selection::Item(20));
	}

	#[test]
	fn confirmation_defaults_on_unknown_reply() {
		assert!(parse_confirmation("YES", false));
		assert!(!parse_confirmation("n", true));
		assert!(!parse_confirmation("", false));
		assert!(parse_confirmation("maybe", true));
	}

	#[test]
	fn exhausted_script_reads_as_closed_input() {
		let mut console = ScriptedConsole::new(Vec::<String>::new());
		let err = Menu::new().item("x", ()).cancel().prompt(&mut console, "?");
		assert!(matches!(err, Err(Error::InputClosed)));
	}
}
