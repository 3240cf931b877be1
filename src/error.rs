use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a command. Cancellation is not one of them; see
/// [`crate::commands::Outcome::Cancelled`].
#[derive(Debug, Error)]
pub enum Error {
	#[error("theme catalog unavailable at {path}: {reason}")]
	CatalogUnavailable { path: PathBuf, reason: String },

	#[error("no installed themes found")]
	NoThemes,

	#[error("theme '{0}' is the only installed theme; there is nothing to copy to")]
	NoTargetTheme(String),

	#[error("cannot read directory {path}: {source}")]
	DirectoryUnreadable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("{source}")]
	CopyFailure {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("search term must not be empty")]
	EmptyPattern,

	#[error("invalid search expression '{pattern}': {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("input closed before a choice was made")]
	InputClosed,

	#[error("console I/O failed: {0}")]
	Console(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
	pub fn catalog_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
		Self::CatalogUnavailable {
			path: path.into(),
			reason: reason.to_string(),
		}
	}

	pub fn directory_unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::DirectoryUnreadable {
			path: path.into(),
			source,
		}
	}
}
