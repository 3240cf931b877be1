use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming the project root when `--project` is absent.
pub const PROJECT_ENV: &str = "THEME_DEV_TOOLS_PROJECT";

#[derive(Debug, Clone)]
pub struct Config {
	/// Canonical root of the project whose themes are listed.
	pub project_root: PathBuf,
}

impl Config {
	/// Resolve the project root from the CLI flag, then the environment, then
	/// the current directory.
	pub fn load(project: Option<&Path>) -> Result<Self> {
		let env_project = std::env::var(PROJECT_ENV)
			.ok()
			.filter(|s| !s.is_empty())
			.map(PathBuf::from);
		Self::resolve(project, env_project.as_deref())
	}

	fn resolve(project: Option<&Path>, env_project: Option<&Path>) -> Result<Self> {
		let candidate = project
			.or(env_project)
			.map(Path::to_path_buf)
			.unwrap_or_else(|| PathBuf::from("."));
		let project_root = dunce::canonicalize(&candidate)
			.map_err(|err| Error::catalog_unavailable(&candidate, err))?;
		tracing::debug!(root = %project_root.display(), "resolved project root");
		Ok(Self { project_root })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flag_wins_over_environment() {
		let flag = tempfile::tempdir().unwrap();
		let env = tempfile::tempdir().unwrap();
		let config = Config::resolve(Some(flag.path()), Some(env.path())).unwrap();
		assert_eq!(config.project_root, dunce::canonicalize(flag.path()).unwrap());
	}

	#[test]
	fn environment_used_without_flag() {
		let env = tempfile::tempdir().unwrap();
		let config = Config::resolve(None, Some(env.path())).unwrap();
		assert_eq!(config.project_root, dunce::canonicalize(env.path()).unwrap());
	}

	#[test]
	fn missing_root_is_catalog_error() {
		let temp = tempfile::tempdir().unwrap();
		let result = Config::resolve(Some(&temp.path().join("missing")), None);
		assert!(matches!(result, Err(Error::CatalogUnavailable { .. })));
	}
}
