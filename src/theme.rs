//! Theme catalog: the installed themes of a project and where they live.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the storefront base theme shipped with the platform.
pub const STOREFRONT: &str = "Storefront";

const STOREFRONT_RESOURCES: &str = "vendor/shopware/storefront/Resources";
const THEME_MANIFEST: &str = "theme.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
	pub technical_name: String,
	pub base_path: PathBuf,
}

impl ThemeDescriptor {
	pub fn new(technical_name: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
		Self {
			technical_name: technical_name.into(),
			base_path: base_path.into(),
		}
	}
}

/// Source of installed themes.
pub trait ThemeRegistry {
	fn themes(&self) -> Result<Vec<ThemeDescriptor>>;
}

/// Query `registry` once, keeping its order and the first of any duplicate
/// technical names.
pub fn list_themes(registry: &dyn ThemeRegistry) -> Result<Vec<ThemeDescriptor>> {
	let mut seen = BTreeSet::new();
	let mut themes = registry.themes()?;
	themes.retain(|theme| {
		let fresh = seen.insert(theme.technical_name.clone());
		if !fresh {
			tracing::warn!(
				theme = %theme.technical_name,
				path = %theme.base_path.display(),
				"ignoring duplicate theme"
			);
		}
		fresh
	});
	Ok(themes)
}

/// Every theme except `source`, in catalog order.
pub fn other_themes<'a>(
	themes: &'a [ThemeDescriptor],
	source: &ThemeDescriptor,
) -> Vec<&'a ThemeDescriptor> {
	themes
		.iter()
		.filter(|theme| theme.technical_name != source.technical_name)
		.collect()
}

/// Where extensions of one kind are installed and where their theme
/// resources sit inside each extension.
#[derive(Debug, Clone, Copy)]
struct ExtensionDir {
	dir: &'static str,
	resources: &'static str,
	reads_composer: bool,
}

const EXTENSION_DIRS: [ExtensionDir; 3] = [
	ExtensionDir {
		dir: "custom/plugins",
		resources: "src/Resources",
		reads_composer: true,
	},
	ExtensionDir {
		dir: "custom/static-plugins",
		resources: "src/Resources",
		reads_composer: true,
	},
	ExtensionDir {
		dir: "custom/apps",
		resources: "Resources",
		reads_composer: false,
	},
];

/// Reads installed themes straight from a Shopware project tree.
#[derive(Debug, Clone)]
pub struct ProjectThemeRegistry {
	root: PathBuf,
}

impl ProjectThemeRegistry {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	fn storefront(&self) -> Option<ThemeDescriptor> {
		let resources = self.root.join(STOREFRONT_RESOURCES);
		resources
			.join(THEME_MANIFEST)
			.is_file()
			.then(|| ThemeDescriptor::new(STOREFRONT, resources))
	}

	fn extension_themes(&self, kind: ExtensionDir) -> Result<Vec<ThemeDescriptor>> {
		let dir = self.root.join(kind.dir);
		if !dir.is_dir() {
			return Ok(Vec::new());
		}

		let mut extensions: Vec<PathBuf> = fs::read_dir(&dir)
			.map_err(|err| Error::catalog_unavailable(&dir, err))?
			.filter_map(|entry| entry.ok())
			.map(|entry| entry.path())
			.filter(|path| path.is_dir())
			.collect();
		extensions.sort();

		let mut themes = Vec::new();
		for extension in extensions {
			let resources = extension.join(kind.resources);
			if !resources.join(THEME_MANIFEST).is_file() {
				continue;
			}
			let Some(dir_name) = extension.file_name().and_then(|name| name.to_str()) else {
				continue;
			};
			let technical_name = if kind.reads_composer {
				plugin_class_name(&extension).unwrap_or_else(|| dir_name.to_owned())
			} else {
				dir_name.to_owned()
			};
			tracing::debug!(theme = %technical_name, path = %resources.display(), "found theme");
			themes.push(ThemeDescriptor::new(technical_name, resources));
		}
		Ok(themes)
	}
}

impl ThemeRegistry for ProjectThemeRegistry {
	fn themes(&self) -> Result<Vec<ThemeDescriptor>> {
		let has_storefront = self.root.join(STOREFRONT_RESOURCES).is_dir();
		let has_custom = self.root.join("custom").is_dir();
		if !has_storefront && !has_custom {
			return Err(Error::catalog_unavailable(
				&self.root,
				"not a Shopware project (no vendor/shopware/storefront or custom directory)",
			));
		}

		let mut themes: Vec<_> = self.storefront().into_iter().collect();
		for kind in EXTENSION_DIRS {
			themes.extend(self.extension_themes(kind)?);
		}
		Ok(themes)
	}
}

#[derive(Debug, Deserialize)]
struct ComposerManifest {
	#[serde(default)]
	extra: ComposerExtra,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerExtra {
	#[serde(rename = "shopware-plugin-class")]
	plugin_class: Option<String>,
}

/// Short class name from `extra.shopware-plugin-class`, which is the
/// plugin's technical name.
fn plugin_class_name(plugin_dir: &Path) -> Option<String> {
	let path = plugin_dir.join("composer.json");
	let contents = fs::read_to_string(&path).ok()?;
	let manifest: ComposerManifest = match serde_json::from_str(&contents) {
		Ok(manifest) => manifest,
		Err(err) => {
			tracing::warn!(%err, file = %path.display(), "ignoring unparsable composer.json");
			return None;
		}
	};
	let class = manifest.extra.plugin_class?;
	class
		.rsplit('\\')
		.next()
		.filter(|name| !name.is_empty())
		.map(str::to_owned)
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FixedRegistry(Vec<ThemeDescriptor>);

	impl ThemeRegistry for FixedRegistry {
		fn themes(&self) -> Result<Vec<ThemeDescriptor>> {
			Ok(self.0.clone())
		}
	}

	fn touch(path: &Path, contents: &str) {
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, contents).unwrap();
	}

	#[test]
	fn duplicates_keep_first_and_order_is_preserved() {
		let registry = FixedRegistry(vec![
			ThemeDescriptor::new("B", "/themes/B"),
			ThemeDescriptor::new("A", "/themes/A"),
			ThemeDescriptor::new("B", "/elsewhere/B"),
		]);
		let themes = list_themes(&registry).unwrap();
		assert_eq!(
			themes,
			vec![
				ThemeDescriptor::new("B", "/themes/B"),
				ThemeDescriptor::new("A", "/themes/A"),
			]
		);
	}

	#[test]
	fn other_themes_excludes_only_the_source() {
		let themes: Vec<_> = ["A", "B", "C", "D"]
			.iter()
			.map(|name| ThemeDescriptor::new(*name, format!("/themes/{name}")))
			.collect();
		for source in &themes {
			let others = other_themes(&themes, source);
			assert_eq!(others.len(), themes.len() - 1);
			assert!(others.iter().all(|t| t.technical_name != source.technical_name));
			for theme in themes.iter().filter(|t| *t != source) {
				assert_eq!(others.iter().filter(|t| t.technical_name == theme.technical_name).count(), 1);
			}
		}
	}

	#[test]
	fn project_registry_reads_storefront_plugins_and_apps() {
		let temp = tempfile::tempdir().unwrap();
		let root = temp.path();
		touch(&root.join(STOREFRONT_RESOURCES).join(THEME_MANIFEST), "{}");
		touch(
			&root.join("custom/plugins/swag-dark/src/Resources/theme.json"),
			"{}",
		);
		touch(
			&root.join("custom/plugins/swag-dark/composer.json"),
			r#"{"name": "swag/dark", "extra": {"shopware-plugin-class": "Swag\\Dark\\SwagDarkTheme"}}"#,
		);
		touch(&root.join("custom/plugins/NoComposer/src/Resources/theme.json"), "{}");
		touch(&root.join("custom/plugins/NotATheme/src/Resources/config.xml"), "");
		touch(&root.join("custom/apps/AppTheme/Resources/theme.json"), "{}");

		let themes = ProjectThemeRegistry::new(root).themes().unwrap();
		let names: Vec<&str> = themes.iter().map(|t| t.technical_name.as_str()).collect();
		assert_eq!(names, ["Storefront", "NoComposer", "SwagDarkTheme", "AppTheme"]);
		assert_eq!(
			themes[2].base_path,
			root.join("custom/plugins/swag-dark/src/Resources")
		);
		assert_eq!(themes[3].base_path, root.join("custom/apps/AppTheme/Resources"));
	}

	#[test]
	fn broken_composer_manifest_falls_back_to_directory_name() {
		let temp = tempfile::tempdir().unwrap();
		let plugin = temp.path().join("custom/plugins/MyTheme");
		touch(&plugin.join("src/Resources/theme.json"), "{}");
		touch(&plugin.join("composer.json"), "{ not json");

		let themes = ProjectThemeRegistry::new(temp.path()).themes().unwrap();
		assert_eq!(themes, vec![ThemeDescriptor::new("MyTheme", plugin.join("src/Resources"))]);
	}

	#[test]
	fn non_project_directory_is_unavailable() {
		let temp = tempfile::tempdir().unwrap();
		let result = ProjectThemeRegistry::new(temp.path()).themes();
		assert!(matches!(result, Err(Error::CatalogUnavailable { .. })));
	}
}
