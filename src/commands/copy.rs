use std::path::Path;

use crate::category::FileCategory;
use crate::commands::{Outcome, cancelled, choose_theme, load_themes};
use crate::console::{Console, Menu, Selection};
use crate::error::{Error, Result};
use crate::fs::Filesystem;
use crate::picker::{FilePicker, PickOutcome, PickedFile};
use crate::theme::{ThemeDescriptor, ThemeRegistry, other_themes};

pub const DESCRIPTION: &str = "Transfer .twig and .scss files between theme plugins";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
	Copied { target: String },
	Cancelled,
}

pub fn run(
	registry: &dyn ThemeRegistry,
	fs: &dyn Filesystem,
	console: &mut dyn Console,
) -> Result<Outcome> {
	console.title(&format!("Theme Dev Tools COPY: {DESCRIPTION}"));

	let themes = load_themes(registry)?;
	let Some(source) = choose_theme(console, &themes, "Select the source theme")? else {
		return cancelled(console);
	};
	let targets = other_themes(&themes, source);
	if targets.is_empty() {
		return Err(Error::NoTargetTheme(source.technical_name.clone()));
	}

	let category_menu = FileCategory::COPYABLE
		.into_iter()
		.fold(Menu::new(), |menu, category| {
			menu.item(category.copy_label(), category)
		})
		.cancel();
	let Selection::Item(category) = category_menu.prompt(console, "Select filetype to copy")? else {
		return cancelled(console);
	};

	let picker = FilePicker::new(fs, &source.base_path, category);
	let file = match picker.run(console)? {
		PickOutcome::Selected(file) => file,
		PickOutcome::Cancelled => return cancelled(console),
	};
	console.breadcrumb(&format!("Selected file: {file}"));

	match copy_to_theme(fs, console, &source.base_path, category, &file, &targets)? {
		CopyOutcome::Copied { target } => {
			console.success(&format!("{file} copied to {target}"));
			Ok(Outcome::Completed)
		}
		CopyOutcome::Cancelled => cancelled(console),
	}
}

/// Copy a picked file into the same place of another theme.
///
/// Asks for the target among `targets`, and for confirmation when the
/// destination already exists. Nothing is written unless the copy goes ahead.
pub fn copy_to_theme(
	fs: &dyn Filesystem,
	console: &mut dyn Console,
	source_base: &Path,
	category: FileCategory,
	file: &PickedFile,
	targets: &[&ThemeDescriptor],
) -> Result<CopyOutcome> {
	let Some(target) = choose_theme(console, targets.iter().copied(), "Select the target theme")?
	else {
		return Ok(CopyOutcome::Cancelled);
	};

	let relative = file.relative_path();
	let source_path = category.root_in(source_base).join(&relative);
	let destination = category.root_in(&target.base_path).join(&relative);

	if fs.exists(&destination) {
		let question = format!("File exists in {}, overwrite?", target.technical_name);
		if !console.confirm(&question, false)? {
			return Ok(CopyOutcome::Cancelled);
		}
	}

	tracing::debug!(
		from = %source_path.display(),
		to = %destination.display(),
		"copying file"
	);
	fs.copy(&source_path, &destination)
		.map_err(|source| Error::CopyFailure {
			from: source_path.clone(),
			to: destination.clone(),
			source,
		})?;

	Ok(CopyOutcome::Copied {
		target: target.technical_name.clone(),
	})
}
