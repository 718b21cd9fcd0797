use log::trace;
use oximinify_core::Framework;
use std::path::Path;

/// Path fragment identifying a client-side build output
pub const CLIENT_MARKER: &str = "client";

/// Path fragments identifying server-side build outputs
pub const SERVER_MARKERS: &[&str] = &["server", "ssr"];

/// Decides whether the build output written to `dir` receives the minified scripts.
///
/// SvelteKit emits separate client and server outputs, only the client one is processed.
/// Other frameworks process every output that is not a server or SSR bundle.
pub fn should_process(dir: &Path, framework: Framework) -> bool {
    let dir_str = dir.to_string_lossy();
    let process = match framework {
        Framework::SvelteKit => dir_str.contains(CLIENT_MARKER),
        Framework::React | Framework::Vue | Framework::Vanilla => {
            !SERVER_MARKERS.iter().any(|marker| dir_str.contains(marker))
        }
    };
    trace!("Output {} for {}: process={}", dir_str, framework, process);
    process
}
