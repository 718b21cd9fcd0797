use oximinify_core::{Framework, FrameworkRequest, collect_files};
use oximinify_static::{
    BuildPlugin, FileOutcome, OutputDescriptor, PluginOptions, StaticMinifyPlugin,
    transform_file, transform_files,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(files_under(&path));
        } else {
            files.push(path);
        }
    }
    files
}

#[test]
fn sveltekit_manifest_defaults_source_dir_to_static() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(
        temp_dir.path(),
        "package.json",
        r#"{ "devDependencies": { "@sveltejs/kit": "^2.5.0", "vite": "^5.0.0" } }"#,
    );

    let plugin = StaticMinifyPlugin::with_root(temp_dir.path(), PluginOptions::default());
    assert_eq!(plugin.config().framework, Framework::SvelteKit);
    assert_eq!(plugin.config().source_dir, PathBuf::from("static"));
}

#[test]
fn react_project_minifies_nested_widget() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "package.json", r#"{ "dependencies": { "react": "^18.2.0" } }"#);
    create_test_file(root, "public/widgets/a.js", "var x=1;   // comment");
    let out = root.join("dist");
    fs::create_dir_all(&out).unwrap();

    let plugin = StaticMinifyPlugin::with_root(root, PluginOptions::default());
    assert_eq!(plugin.config().framework, Framework::React);
    assert_eq!(plugin.config().file_patterns, vec!["**/*.js", "**/*.mjs"]);

    let summary = plugin.process_output(&OutputDescriptor::new(&out)).unwrap();
    assert_eq!(summary.files_transformed, 1);

    let written = fs::read_to_string(out.join("widgets/a.js")).unwrap();
    assert!(written.contains("x=1"));
    assert!(!written.contains("comment"));
    assert_eq!(files_under(&out), vec![out.join("widgets/a.js")]);
    assert!(!out.join("widgets/widgets").exists());
}

#[test]
fn no_matching_files_is_a_noop() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "public/styles.css", "body { margin: 0 }");
    let out = root.join("dist");

    let options = PluginOptions { verbose: Some(true), ..Default::default() };
    let plugin = StaticMinifyPlugin::with_root(root, options);
    let summary = plugin.process_output(&OutputDescriptor::new(&out)).unwrap();

    assert_eq!(summary.files_transformed, 0);
    assert!(summary.is_noop());
    assert!(!out.exists());
}

#[test]
fn ssr_output_is_never_touched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "public/app.js", "var app = 1;");
    let ssr_out = root.join("dist/ssr");

    let options = PluginOptions {
        framework: FrameworkRequest::Fixed(Framework::Vanilla),
        ..Default::default()
    };
    let plugin = StaticMinifyPlugin::with_root(root, options);
    assert!(plugin.process_output(&OutputDescriptor::new(&ssr_out)).is_none());
    plugin.write_bundle(&OutputDescriptor::new(&ssr_out));

    assert!(!ssr_out.exists());
}

#[test]
fn file_deleted_after_selection_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let src = root.join("public");
    let out = root.join("dist");
    create_test_file(&src, "a.js", "var a = 1;");
    let doomed = create_test_file(&src, "b.js", "var b = 2;");
    create_test_file(&src, "c/d.js", "var d = 4;");

    let plugin = StaticMinifyPlugin::with_root(root, PluginOptions::default());
    let files = collect_files(&src, &plugin.config().file_patterns).unwrap();
    assert_eq!(files.len(), 3);

    fs::remove_file(&doomed).unwrap();

    let skipped = transform_file(plugin.config(), &src, &out, Path::new("b.js"));
    assert_eq!(skipped.outcome, FileOutcome::SkippedMissing);

    let summary = transform_files(plugin.config(), &src, &out, &files);
    assert_eq!(summary.files_transformed, 2);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.files_failed, 0);
    assert!(out.join("a.js").is_file());
    assert!(out.join("c/d.js").is_file());
    assert!(!out.join("b.js").exists());
}

#[test]
fn repeated_runs_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(
        root,
        "public/js/main.js",
        "function main() {\n  console.log('hi');\n}\nmain();\n",
    );
    create_test_file(root, "public/js/mod.mjs", "export function double(n) { return n * 2; }\n");
    let out = root.join("dist");

    let plugin = StaticMinifyPlugin::with_root(root, PluginOptions::default());
    let first = plugin.process_output(&OutputDescriptor::new(&out)).unwrap();
    let main_first = fs::read(out.join("js/main.js")).unwrap();
    let mod_first = fs::read(out.join("js/mod.mjs")).unwrap();

    let second = plugin.process_output(&OutputDescriptor::new(&out)).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(out.join("js/main.js")).unwrap(), main_first);
    assert_eq!(fs::read(out.join("js/mod.mjs")).unwrap(), mod_first);
}

#[test]
fn directory_at_destination_survives_repeat_runs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "public/a.js", "var a = 1;");
    create_test_file(root, "public/b.js", "var b = 2;");
    let out = root.join("dist");
    create_test_file(&out, "a.js/index.html", "<p>not a script</p>");

    let plugin = StaticMinifyPlugin::with_root(root, PluginOptions::default());
    for _ in 0..2 {
        let summary = plugin.process_output(&OutputDescriptor::new(&out)).unwrap();
        assert_eq!(summary.files_transformed, 1);
        assert_eq!(summary.files_skipped, 1);
    }
    assert!(out.join("a.js").is_dir());
    assert!(out.join("a.js/index.html").is_file());
    assert!(out.join("b.js").is_file());
}

#[test]
fn output_dir_option_nests_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "assets/vendor/lib.js", "var lib = { ok: true };");
    let out = root.join("build");

    let options = PluginOptions {
        source_dir: Some(PathBuf::from("assets")),
        output_dir: Some(PathBuf::from("static/js")),
        ..Default::default()
    };
    let plugin = StaticMinifyPlugin::with_root(root, options);
    let summary = plugin.process_output(&OutputDescriptor::new(&out)).unwrap();

    assert_eq!(summary.files_transformed, 1);
    assert!(out.join("static/js/vendor/lib.js").is_file());
}
