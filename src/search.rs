//! Recursive pattern search over one category root of a theme.

use std::io::{self, BufRead};
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::category::FileCategory;
use crate::error::{Error, Result};
use crate::fs::{FileWalk, Filesystem};

const DELIMITER: char = '/';

/// A compiled search expression.
///
/// Input wrapped in `/.../` is used as a regular expression; anything else is
/// matched as literal text, metacharacters included.
#[derive(Debug, Clone)]
pub struct Pattern {
	regex: Regex,
}

impl Pattern {
	pub fn parse(input: &str) -> Result<Self> {
		let input = input.trim();
		if input.is_empty() {
			return Err(Error::EmptyPattern);
		}

		let expression = match delimited(input) {
			Some("") => return Err(Error::EmptyPattern),
			Some(inner) => inner.to_owned(),
			None => regex::escape(input),
		};
		let regex = Regex::new(&expression).map_err(|source| Error::InvalidPattern {
			pattern: input.to_owned(),
			source,
		})?;
		Ok(Self { regex })
	}

	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Byte ranges of every non-overlapping match, leftmost first.
	pub fn find_spans(&self, line: &str) -> Vec<Range<usize>> {
		self.regex.find_iter(line).map(|found| found.range()).collect()
	}
}

fn delimited(input: &str) -> Option<&str> {
	if input.len() < 2 {
		return None;
	}
	input
		.strip_prefix(DELIMITER)
		.and_then(|rest| rest.strip_suffix(DELIMITER))
}

/// One line that matched at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
	/// 1-based.
	pub line_number: usize,
	/// The line with trailing whitespace removed.
	pub raw_line: String,
	pub spans: Vec<Range<usize>>,
}

impl MatchRecord {
	/// Render the line with every non-empty match passed through `mark`.
	pub fn highlighted_line(&self, mark: impl Fn(&str) -> String) -> String {
		let mut out = String::with_capacity(self.raw_line.len());
		let mut cursor = 0;
		for span in self.spans.iter().filter(|span| !span.is_empty()) {
			out.push_str(&self.raw_line[cursor..span.start]);
			out.push_str(&mark(&self.raw_line[span.clone()]));
			cursor = span.end;
		}
		out.push_str(&self.raw_line[cursor..]);
		out
	}
}

/// Every matching line of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatches {
	/// Relative to the category root.
	pub relative: PathBuf,
	pub records: Vec<MatchRecord>,
}

impl FileMatches {
	pub fn display_path(&self) -> String {
		self.relative
			.components()
			.map(|part| part.as_os_str().to_string_lossy())
			.collect::<Vec<_>>()
			.join("/")
	}
}

/// Scan `reader` line by line. Invalid UTF-8 is replaced, not rejected.
pub fn scan_lines(mut reader: impl BufRead, pattern: &Pattern) -> io::Result<Vec<MatchRecord>> {
	let mut records = Vec::new();
	let mut buf = Vec::new();
	let mut line_number = 0;
	loop {
		buf.clear();
		if reader.read_until(b'\n', &mut buf)? == 0 {
			break;
		}
		line_number += 1;
		let line = String::from_utf8_lossy(&buf);
		let line = line.trim_end();
		if !pattern.regex.is_match(line) {
			continue;
		}
		records.push(MatchRecord {
			line_number,
			raw_line: line.to_owned(),
			spans: pattern.find_spans(line),
		});
	}
	Ok(records)
}

/// Lazy, single-pass search yielding only files with at least one match.
///
/// Files that cannot be opened or read are logged and skipped.
pub struct Search<'a> {
	fs: &'a dyn Filesystem,
	root: PathBuf,
	category: FileCategory,
	pattern: &'a Pattern,
	files: FileWalk<'a>,
	scanned: usize,
	skipped: usize,
}

pub fn search<'a>(
	fs: &'a dyn Filesystem,
	theme_base: &Path,
	category: FileCategory,
	pattern: &'a Pattern,
) -> Result<Search<'a>> {
	let root = category.root_in(theme_base);
	fs.read_dir(&root)
		.map_err(|source| Error::directory_unreadable(&root, source))?;
	tracing::debug!(root = %root.display(), pattern = pattern.as_str(), "starting search");
	Ok(Search {
		fs,
		files: fs.walk_files(&root),
		root,
		category,
		pattern,
		scanned: 0,
		skipped: 0,
	})
}

impl Search<'_> {
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Files scanned so far.
	pub fn scanned(&self) -> usize {
		self.scanned
	}

	/// Files skipped so far because they could not be read.
	pub fn skipped(&self) -> usize {
		self.skipped
	}

	fn scan_file(&self, path: &Path) -> io::Result<Vec<MatchRecord>> {
		let reader = self.fs.open(path)?;
		scan_lines(reader, self.pattern)
	}
}

impl Iterator for Search<'_> {
	type Item = FileMatches;

	fn next(&mut self) -> Option<FileMatches> {
		loop {
			let path = match self.files.next()? {
				Ok(path) => path,
				Err(err) => {
					tracing::debug!(%err, root = %self.root.display(), "skipping unreadable entry");
					continue;
				}
			};
			let searchable = path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(|name| self.category.is_searchable(name));
			if !searchable {
				continue;
			}

			let records = match self.scan_file(&path) {
				Ok(records) => records,
				Err(err) => {
					self.skipped += 1;
					tracing::debug!(%err, file = %path.display(), "skipping unreadable file");
					continue;
				}
			};
			self.scanned += 1;
			if records.is_empty() {
				continue;
			}

			let relative = pathdiff::diff_paths(&path, &self.root).unwrap_or(path);
			return Some(FileMatches { relative, records });
		}
	}
}
