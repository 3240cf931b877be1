//! Filesystem access used by the picker, the copy orchestrator and the search.
//!
//! Commands only see the [`Filesystem`] trait, so they run unchanged against
//! the local disk or an in-memory tree.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
	pub name: String,
	pub is_dir: bool,
}

impl FsEntry {
	pub fn dir(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			is_dir: true,
		}
	}

	pub fn file(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			is_dir: false,
		}
	}
}

pub type FileWalk<'a> = Box<dyn Iterator<Item = io::Result<PathBuf>> + 'a>;

pub trait Filesystem {
	fn exists(&self, path: &Path) -> bool;

	/// Immediate children of `path` (depth exactly one), in no particular order.
	fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

	/// Every regular file below `root`, depth-unbounded, symlinks followed.
	/// Dot-prefixed files and directories below `root` are pruned. The order
	/// is stable for an unchanged tree.
	fn walk_files<'a>(&'a self, root: &Path) -> FileWalk<'a>;

	fn open<'a>(&'a self, path: &Path) -> io::Result<Box<dyn BufRead + 'a>>;

	/// Copy `from` to `to`, creating missing parent directories and replacing
	/// an existing destination.
	fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
	fn exists(&self, path: &Path) -> bool {
		path.exists()
	}

	fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
		let mut entries = Vec::new();
		for entry in fs::read_dir(path)? {
			let entry = entry?;
			let name = match entry.file_name().into_string() {
				Ok(name) => name,
				Err(raw) => {
					tracing::debug!(name = ?raw, dir = %path.display(), "skipping non UTF-8 entry");
					continue;
				}
			};
			// Follow symlinks so a linked directory can still be descended into.
			let is_dir = fs::metadata(entry.path())
				.map(|meta| meta.is_dir())
				.unwrap_or(false);
			entries.push(FsEntry { name, is_dir });
		}
		Ok(entries)
	}

	fn walk_files<'a>(&'a self, root: &Path) -> FileWalk<'a> {
		let walk = WalkDir::new(root)
			.follow_links(true)
			.sort_by_file_name()
			.into_iter()
			.filter_entry(|entry| entry.depth() == 0 || !is_dot_name(entry.file_name()))
			.filter_map(|entry| match entry {
				Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
				Ok(_) => None,
				Err(err) => Some(Err(io::Error::other(err))),
			});
		Box::new(walk)
	}

	fn open<'a>(&'a self, path: &Path) -> io::Result<Box<dyn BufRead + 'a>> {
		Ok(Box::new(BufReader::new(File::open(path)?)))
	}

	fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
		if let Some(parent) = to.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::copy(from, to).map(|_| ())
	}
}

fn is_dot_name(name: &OsStr) -> bool {
	name.to_string_lossy().starts_with('.')
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn local_read_dir_marks_directories() {
		let temp = tempfile::tempdir().unwrap();
		fs::create_dir(temp.path().join("page")).unwrap();
		fs::write(temp.path().join("base.html.twig"), "{% block base %}").unwrap();

		let mut entries = LocalFilesystem.read_dir(temp.path()).unwrap();
		entries.sort_by(|a, b| a.name.cmp(&b.name));
		assert_eq!(
			entries,
			vec![FsEntry::file("base.html.twig"), FsEntry::dir("page")]
		);
	}

	#[test]
	fn local_read_dir_of_missing_directory_fails() {
		let temp = tempfile::tempdir().unwrap();
		assert!(LocalFilesystem.read_dir(&temp.path().join("missing")).is_err());
	}

	#[test]
	fn local_walk_is_recursive_and_sorted() {
		let temp = tempfile::tempdir().unwrap();
		fs::create_dir_all(temp.path().join("b/deep")).unwrap();
		fs::write(temp.path().join("b/deep/z.js"), "").unwrap();
		fs::write(temp.path().join("a.js"), "").unwrap();
		fs::write(temp.path().join("c.js"), "").unwrap();

		let walked: Vec<_> = LocalFilesystem
			.walk_files(temp.path())
			.map(|path| path.unwrap())
			.collect();
		assert_eq!(
			walked,
			vec![
				temp.path().join("a.js"),
				temp.path().join("b/deep/z.js"),
				temp.path().join("c.js"),
			]
		);
	}

	#[test]
	fn local_walk_prunes_dot_directories() {
		let temp = tempfile::tempdir().unwrap();
		fs::create_dir_all(temp.path().join(".cache/deep")).unwrap();
		fs::create_dir_all(temp.path().join("node_modules/.bin")).unwrap();
		fs::write(temp.path().join(".cache/deep/bundle.js"), "").unwrap();
		fs::write(temp.path().join("node_modules/.bin/tool.js"), "").unwrap();
		fs::write(temp.path().join(".eslintrc.js"), "").unwrap();
		fs::write(temp.path().join("main.js"), "").unwrap();

		let walked: Vec<_> = LocalFilesystem
			.walk_files(temp.path())
			.map(|path| path.unwrap())
			.collect();
		assert_eq!(walked, vec![temp.path().join("main.js")]);
	}

	#[test]
	fn local_walk_keeps_dot_root() {
		let temp = tempfile::tempdir().unwrap();
		let root = temp.path().join(".theme");
		fs::create_dir_all(&root).unwrap();
		fs::write(root.join("a.js"), "").unwrap();

		let walked: Vec<_> = LocalFilesystem.walk_files(&root).map(|path| path.unwrap()).collect();
		assert_eq!(walked, vec![root.join("a.js")]);
	}

	#[cfg(unix)]
	#[test]
	fn local_walk_follows_symlinked_files() {
		let temp = tempfile::tempdir().unwrap();
		let scss = temp.path().join("scss");
		fs::create_dir_all(&scss).unwrap();
		fs::write(temp.path().join("shared.scss"), "$hit: 1;").unwrap();
		std::os::unix::fs::symlink("../shared.scss", scss.join("linked.scss")).unwrap();

		let walked: Vec<_> = LocalFilesystem.walk_files(&scss).map(|path| path.unwrap()).collect();
		assert_eq!(walked, vec![scss.join("linked.scss")]);
	}

	#[test]
	fn local_copy_creates_missing_parents() {
		let temp = tempfile::tempdir().unwrap();
		let from = temp.path().join("A/page/index.html.twig");
		let to = temp.path().join("B/page/index.html.twig");
		fs::create_dir_all(from.parent().unwrap()).unwrap();
		fs::write(&from, "content").unwrap();

		LocalFilesystem.copy(&from, &to).unwrap();
		assert_eq!(fs::read_to_string(&to).unwrap(), "content");
	}
}
