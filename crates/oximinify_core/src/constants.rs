//! Constants shared by framework detection, file selection and minification.
//!
//! ## Framework markers
//!
//! Detection inspects the dependency names declared in `package.json`. The marker
//! tables are checked in priority order: SvelteKit first, then React, then Vue.

/// Name of the project manifest read for framework detection
pub const MANIFEST_FILE: &str = "package.json";

/// Glob patterns used when the user does not supply any
pub const DEFAULT_FILE_PATTERNS: &[&str] = &["**/*.js", "**/*.mjs"];

/// Source directory for SvelteKit projects
pub const SVELTEKIT_SOURCE_DIR: &str = "static";

/// Source directory for every other framework
pub const DEFAULT_SOURCE_DIR: &str = "public";

/// Dependencies that mark a SvelteKit project
pub const SVELTEKIT_MARKERS: &[&str] = &["@sveltejs/kit"];

/// Dependencies that mark a React project (runtime or bundler integration)
pub const REACT_MARKERS: &[&str] = &["react", "@vitejs/plugin-react", "@vitejs/plugin-react-swc"];

/// Dependencies that mark a Vue project (runtime or bundler integration)
pub const VUE_MARKERS: &[&str] = &["vue", "@vitejs/plugin-vue", "@vitejs/plugin-vue-jsx"];
