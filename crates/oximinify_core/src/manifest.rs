use anyhow::{Context, Result};
use log::{debug, trace};
use serde::{Deserialize, Deserializer};
use std::{collections::HashMap, fs, path::Path};

use crate::{
    constants::{MANIFEST_FILE, REACT_MARKERS, SVELTEKIT_MARKERS, VUE_MARKERS},
    types::Framework,
};

/// The dependency tables of a `package.json`. Everything else in the file is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: HashMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies", deserialize_with = "null_as_empty")]
    pub dev_dependencies: HashMap<String, serde_json::Value>,
}

type DependencyTable = HashMap<String, serde_json::Value>;

/// An explicit `null` table counts as an empty one
fn null_as_empty<'de, D>(deserializer: D) -> Result<DependencyTable, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DependencyTable>::deserialize(deserializer)?.unwrap_or_default())
}

impl Manifest {
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    fn has_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_dependency(name))
    }
}

/// Detection table, first match wins.
const DETECTION_ORDER: &[(&[&str], Framework)] = &[
    (SVELTEKIT_MARKERS, Framework::SvelteKit),
    (REACT_MARKERS, Framework::React),
    (VUE_MARKERS, Framework::Vue),
];

pub fn read_manifest(root: &Path) -> Result<Manifest> {
    let path = root.join(MANIFEST_FILE);
    trace!("Reading manifest at: {:?}", path);
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn framework_for(manifest: &Manifest) -> Framework {
    DETECTION_ORDER
        .iter()
        .find(|(markers, _)| manifest.has_any(markers))
        .map(|(_, framework)| *framework)
        .unwrap_or(Framework::Vanilla)
}

/// Detects the framework of the project rooted at `root`.
///
/// A missing or unparseable manifest is not an error: detection falls back to
/// [`Framework::Vanilla`].
pub fn detect_framework(root: &Path) -> Framework {
    debug!("Detecting framework from manifest in: {:?}", root);
    match read_manifest(root) {
        Ok(manifest) => {
            let framework = framework_for(&manifest);
            debug!("Detected framework: {}", framework);
            framework
        }
        Err(e) => {
            debug!("Falling back to vanilla: {:#}", e);
            Framework::Vanilla
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_detect_sveltekit() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{ "devDependencies": { "@sveltejs/kit": "^2.0.0", "svelte": "^4.0.0" } }"#,
        );
        assert_eq!(detect_framework(temp_dir.path()), Framework::SvelteKit);
    }

    #[test]
    fn test_detect_react_from_plugin() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{ "devDependencies": { "@vitejs/plugin-react": "^4.0.0" } }"#,
        );
        assert_eq!(detect_framework(temp_dir.path()), Framework::React);
    }

    #[test]
    fn test_detect_vue() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "package.json", r#"{ "dependencies": { "vue": "^3" } }"#);
        assert_eq!(detect_framework(temp_dir.path()), Framework::Vue);
    }

    #[test]
    fn test_sveltekit_wins_over_react_and_vue() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{
  "dependencies": { "react": "^18", "vue": "^3" },
  "devDependencies": { "@sveltejs/kit": "^2" }
}"#,
        );
        assert_eq!(detect_framework(temp_dir.path()), Framework::SvelteKit);
    }

    #[test]
    fn test_null_dependency_table_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{ "dependencies": null, "devDependencies": { "@sveltejs/kit": "^2" } }"#,
        );
        assert_eq!(detect_framework(temp_dir.path()), Framework::SvelteKit);
    }

    #[test]
    fn test_react_wins_over_vue() {
        let manifest = Manifest {
            dependencies: HashMap::from([
                ("vue".to_string(), serde_json::json!("^3")),
                ("react".to_string(), serde_json::json!("^18")),
            ]),
            dev_dependencies: HashMap::new(),
        };
        assert_eq!(framework_for(&manifest), Framework::React);
    }

    #[test]
    fn test_no_markers_is_vanilla() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{ "name": "site", "dependencies": { "lodash": "^4" } }"#,
        );
        assert_eq!(detect_framework(temp_dir.path()), Framework::Vanilla);
    }

    #[test]
    fn test_missing_manifest_is_vanilla() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(detect_framework(temp_dir.path()), Framework::Vanilla);
        assert!(read_manifest(temp_dir.path()).is_err());
    }

    #[test]
    fn test_malformed_manifest_is_vanilla() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "package.json", "{ \"dependencies\": { \"react\": ");
        assert_eq!(detect_framework(temp_dir.path()), Framework::Vanilla);
    }

    #[test]
    fn test_non_string_versions_still_detect() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{ "dependencies": { "react": { "version": "18" } } }"#,
        );
        assert_eq!(detect_framework(temp_dir.path()), Framework::React);
    }
}
