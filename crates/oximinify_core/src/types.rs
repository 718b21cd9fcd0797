use std::{fmt, path::Path, str::FromStr};

/// A framework resolved for a project. Never `auto`: that is only a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    SvelteKit,
    React,
    Vue,
    Vanilla,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::SvelteKit => "sveltekit",
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Vanilla => "vanilla",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The framework a user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameworkRequest {
    #[default]
    Auto,
    Fixed(Framework),
}

impl FromStr for FrameworkRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "sveltekit" => Ok(Self::Fixed(Framework::SvelteKit)),
            "react" => Ok(Self::Fixed(Framework::React)),
            "vue" => Ok(Self::Fixed(Framework::Vue)),
            "vanilla" => Ok(Self::Fixed(Framework::Vanilla)),
            other => Err(format!(
                "Unknown framework '{}'. Expected: sveltekit, react, vue, vanilla, auto",
                other
            )),
        }
    }
}

/// How the minifier should parse a file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    /// Classic script (`.js`, `.cjs`); `.js` falls back to module parsing
    Script,
    /// ES module (`.mjs`)
    Module,
    Jsx,
    /// TypeScript (`.ts`, `.mts`, `.cts`)
    Ts,
    Tsx,
}

impl Loader {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("mjs") => Loader::Module,
            Some("jsx") => Loader::Jsx,
            Some("ts") | Some("mts") | Some("cts") => Loader::Ts,
            Some("tsx") => Loader::Tsx,
            _ => Loader::Script,
        }
    }
}
