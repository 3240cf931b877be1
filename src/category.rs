//! File categories a theme carries and where they live inside a theme root.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

pub const TEMPLATE_ROOT: &str = "views/storefront";
pub const STYLESHEET_ROOT: &str = "app/storefront/src/scss";
pub const SCRIPT_ROOT: &str = "app/storefront/src";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FileCategory {
	/// Storefront stylesheets (`*.scss`).
	#[value(name = "scss")]
	Stylesheet,
	/// Twig templates (`*.twig`, picked as `*.html.twig`).
	#[value(name = "twig")]
	Template,
	/// Storefront scripts (`*.js`).
	#[value(name = "js")]
	Script,
}

impl FileCategory {
	/// Categories offered by the copy flow, in prompt order.
	pub const COPYABLE: [FileCategory; 2] = [FileCategory::Template, FileCategory::Stylesheet];

	/// Categories offered by the find flow, in prompt order.
	pub const SEARCHABLE: [FileCategory; 3] = [
		FileCategory::Stylesheet,
		FileCategory::Template,
		FileCategory::Script,
	];

	/// Subdirectory of a theme root that holds this kind of file.
	pub fn root(self) -> &'static str {
		match self {
			FileCategory::Template => TEMPLATE_ROOT,
			FileCategory::Stylesheet => STYLESHEET_ROOT,
			FileCategory::Script => SCRIPT_ROOT,
		}
	}

	/// Absolute category root for a theme.
	pub fn root_in(self, theme_base: &Path) -> PathBuf {
		theme_base.join(self.root())
	}

	/// Suffix a file must carry to be offered by the picker.
	pub fn pick_suffix(self) -> &'static str {
		match self {
			FileCategory::Template => ".html.twig",
			FileCategory::Stylesheet => ".scss",
			FileCategory::Script => ".js",
		}
	}

	/// Extension matched by the recursive search (`*.<ext>`).
	pub fn search_extension(self) -> &'static str {
		match self {
			FileCategory::Template => "twig",
			FileCategory::Stylesheet => "scss",
			FileCategory::Script => "js",
		}
	}

	pub fn is_pickable(self, file_name: &str) -> bool {
		file_name.ends_with(self.pick_suffix())
	}

	pub fn is_searchable(self, file_name: &str) -> bool {
		file_name
			.strip_suffix(self.search_extension())
			.is_some_and(|stem| stem.ends_with('.'))
	}

	/// Label used by the copy flow's file-type prompt.
	pub fn copy_label(self) -> &'static str {
		match self {
			FileCategory::Template => "Twig Template",
			FileCategory::Stylesheet => "SCSS File",
			FileCategory::Script => "JS File",
		}
	}
}

impl fmt::Display for FileCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.search_extension())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn template_picker_requires_html_twig() {
		assert!(FileCategory::Template.is_pickable("index.html.twig"));
		assert!(!FileCategory::Template.is_pickable("macros.twig"));
		assert!(!FileCategory::Template.is_pickable("index.html"));
	}

	#[test]
	fn template_search_accepts_any_twig() {
		assert!(FileCategory::Template.is_searchable("macros.twig"));
		assert!(FileCategory::Template.is_searchable("index.html.twig"));
		assert!(!FileCategory::Template.is_searchable("notwig"));
	}

	#[test]
	fn roots_match_theme_layout() {
		let base = Path::new("/themes/A");
		assert_eq!(
			FileCategory::Stylesheet.root_in(base),
			PathBuf::from("/themes/A/app/storefront/src/scss")
		);
		assert_eq!(
			FileCategory::Script.root_in(base),
			PathBuf::from("/themes/A/app/storefront/src")
		);
	}
}
