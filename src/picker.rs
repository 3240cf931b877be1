//! Interactive file picker.
//!
//! Walks one category root a directory level at a time. The walk is a stack
//! of path segments: opening a directory pushes, `back` pops, and only names
//! taken from the current listing are ever pushed, so the picked path always
//! stays below the category root.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::category::FileCategory;
use crate::console::{Console, Menu, Selection};
use crate::error::{Error, Result};
use crate::fs::Filesystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
	pub display_label: String,
	pub raw_name: String,
	pub is_directory: bool,
}

impl DirEntry {
	fn directory(name: String) -> Self {
		Self {
			display_label: format!("/{name}"),
			raw_name: name,
			is_directory: true,
		}
	}

	fn file(name: String) -> Self {
		Self {
			display_label: name.clone(),
			raw_name: name,
			is_directory: false,
		}
	}
}

/// A file chosen in the picker, relative to its category root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
	segments: Vec<String>,
}

impl PickedFile {
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn relative_path(&self) -> PathBuf {
		self.segments.iter().collect()
	}
}

impl fmt::Display for PickedFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.segments.join("/"))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickAction {
	/// Open the entry at this index of the current listing.
	Open(usize),
	Back,
	Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
	Selected(PickedFile),
	Cancelled,
}

pub struct FilePicker<'a> {
	fs: &'a dyn Filesystem,
	category: FileCategory,
	root: PathBuf,
	segments: Vec<String>,
}

impl<'a> FilePicker<'a> {
	pub fn new(fs: &'a dyn Filesystem, theme_base: &Path, category: FileCategory) -> Self {
		Self {
			fs,
			category,
			root: category.root_in(theme_base),
			segments: Vec::new(),
		}
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn current_dir(&self) -> PathBuf {
		let mut dir = self.root.clone();
		dir.extend(&self.segments);
		dir
	}

	/// Subdirectories first, then files of the active category, each group
	/// sorted by name. Dot entries are hidden.
	pub fn list(&self) -> Result<Vec<DirEntry>> {
		let dir = self.current_dir();
		let children = self
			.fs
			.read_dir(&dir)
			.map_err(|source| Error::directory_unreadable(&dir, source))?;

		let (mut dirs, mut files): (Vec<_>, Vec<_>) = children
			.into_iter()
			.filter(|child| is_plain_name(&child.name))
			.filter(|child| child.is_dir || self.category.is_pickable(&child.name))
			.partition(|child| child.is_dir);
		dirs.sort_by(|a, b| a.name.cmp(&b.name));
		files.sort_by(|a, b| a.name.cmp(&b.name));

		Ok(dirs
			.into_iter()
			.map(|child| DirEntry::directory(child.name))
			.chain(files.into_iter().map(|child| DirEntry::file(child.name)))
			.collect())
	}

	pub fn menu(&self, entries: &[DirEntry]) -> Menu<PickAction> {
		let mut menu = Menu::new();
		for (index, entry) in entries.iter().enumerate() {
			menu = if entry.is_directory {
				menu.item(&entry.display_label, PickAction::Open(index))
			} else {
				menu.emphasized_item(&entry.display_label, PickAction::Open(index))
			};
		}
		if !self.segments.is_empty() {
			menu = menu.back();
		}
		menu.cancel()
	}

	/// Apply one decision against the listing it was made on. `None` means
	/// the walk goes on.
	pub fn apply(&mut self, entries: &[DirEntry], action: PickAction) -> Option<PickOutcome> {
		match action {
			PickAction::Cancel => Some(PickOutcome::Cancelled),
			PickAction::Back => {
				self.segments.pop();
				None
			}
			PickAction::Open(index) => {
				let entry = entries.get(index)?;
				self.segments.push(entry.raw_name.clone());
				if entry.is_directory {
					return None;
				}
				if self.category.is_pickable(&entry.raw_name) {
					Some(PickOutcome::Selected(PickedFile {
						segments: self.segments.clone(),
					}))
				} else {
					tracing::warn!(
						file = %self.current_dir().display(),
						category = %self.category,
						"picked file does not belong to the category"
					);
					Some(PickOutcome::Cancelled)
				}
			}
		}
	}

	pub fn run(mut self, console: &mut dyn Console) -> Result<PickOutcome> {
		loop {
			if !self.segments.is_empty() {
				console.breadcrumb(&format!("You are here: {}", self.segments.join("/")));
			}
			let entries = self.list()?;
			let action = match self
				.menu(&entries)
				.prompt(console, "Select file or descend into directory")?
			{
				Selection::Item(action) => action,
				Selection::Back => PickAction::Back,
				Selection::Cancel => PickAction::Cancel,
			};
			if let Some(outcome) = self.apply(&entries, action) {
				return Ok(outcome);
			}
		}
	}
}

fn is_plain_name(name: &str) -> bool {
	!name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}
