use sourcesnatcher::output::format_result;
use sourcesnatcher::{
    CaptureBuilder, CaptureConfig, CaptureError, CaptureResult, OutputFormat, RootTransform,
    capture, snapshot,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
fn sample_project(root: &Path) {
    fs::write(root.join("test.txt"), "test content").unwrap();
    fs::write(root.join("test.json"), r#"{"test": "content"}"#).unwrap();
    fs::write(root.join("test.py"), r#"print("test")"#).unwrap();
    fs::write(root.join("test.bin"), [0u8, 159, 146, 150, 1, 2]).unwrap();
    fs::create_dir(root.join(".git")).unwrap();
    fs::create_dir(root.join("node_modules")).unwrap();
    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src/test.py"), r#"print("src test")"#).unwrap();
}
fn keys(result: &CaptureResult) -> Vec<&str> {
    result.files.keys().map(String::as_str).collect()
}
fn tree_body(result: &CaptureResult) -> Vec<&str> {
    result.tree.lines().skip(1).collect()
}
#[test]
fn default_config_captures_only_text_files() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(
        keys(&result),
        ["src/test.py", "test.json", "test.py", "test.txt"]
    );
    assert_eq!(result.files["test.txt"], "test content");
    assert_eq!(result.files["src/test.py"], r#"print("src test")"#);
}
#[test]
fn tree_lists_visible_entries_with_connectors() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    let root_name = dir.path().file_name().unwrap().to_string_lossy();
    assert_eq!(result.tree.lines().next(), Some(root_name.as_ref()));
    assert_eq!(
        tree_body(&result),
        [
            "├── src",
            "│   └── test.py",
            "├── test.json",
            "├── test.py",
            "└── test.txt",
        ]
    );
}
#[test]
fn missing_root_fails_before_writing() {
    let dir = tempdir().unwrap();
    let options = CaptureBuilder::new(dir.path().join("nope")).build();
    let mut sink = Vec::new();
    let err = capture(&options, &mut sink, OutputFormat::Json).unwrap_err();
    assert!(matches!(err, CaptureError::DirectoryNotFound(ref p) if p.ends_with("nope")));
    assert!(err.to_string().starts_with("Directory not found:"));
    assert!(sink.is_empty());
}
#[test]
fn root_that_is_a_file_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let err = snapshot(&CaptureBuilder::new(&file).build()).unwrap_err();
    assert!(matches!(err, CaptureError::DirectoryNotFound(_)));
}
#[test]
fn missing_tool_is_checked_first() {
    let dir = tempdir().unwrap();
    let options = CaptureBuilder::new(dir.path())
        .require_tool("no-such-listing-tool-7731")
        .build();
    let err = snapshot(&options).unwrap_err();
    assert!(matches!(err, CaptureError::MissingExternalTool(_)));
}
#[test]
fn excluded_directories_are_pruned_at_any_depth() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("node_modules/pkg/lib")).unwrap();
    fs::write(root.join("node_modules/pkg/lib/index.md"), "hidden").unwrap();
    fs::create_dir_all(root.join("app/nested/node_modules/dep")).unwrap();
    fs::write(root.join("app/nested/node_modules/dep/readme.md"), "hidden").unwrap();
    fs::write(root.join("app/nested/keep.md"), "kept").unwrap();
    let result = snapshot(&CaptureBuilder::new(root).build()).unwrap();
    assert_eq!(keys(&result), ["app/nested/keep.md"]);
    assert!(!result.tree.contains("node_modules"));
    assert!(!result.tree.contains("dep"));
    assert_eq!(
        tree_body(&result),
        ["└── app", "    └── nested", "        └── keep.md"]
    );
}
#[test]
fn excluded_files_never_appear() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("conf")).unwrap();
    fs::write(root.join("credentials.txt"), "secret").unwrap();
    fs::write(root.join("conf/credentials.txt"), "secret").unwrap();
    fs::write(root.join(".gitignore"), "target/").unwrap();
    fs::write(root.join("conf/app.conf"), "a=1").unwrap();
    let result = snapshot(&CaptureBuilder::new(root).build()).unwrap();
    assert_eq!(keys(&result), ["conf/app.conf"]);
    assert!(!result.tree.contains("credentials"));
    assert!(!result.tree.contains(".gitignore"));
}
#[test]
fn empty_included_directories_still_show_in_tree() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::create_dir(dir.path().join("venv")).unwrap();
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(tree_body(&result), ["└── docs"]);
    assert!(result.files.is_empty());
}
#[test]
fn include_files_config_is_the_only_text_rule() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    fs::write(dir.path().join("Makefile"), "all:\n\ttrue\n").unwrap();
    let config = CaptureConfig {
        excluded_dirs: [".git", "node_modules"].iter().map(|s| s.to_string()).collect(),
        excluded_files: BTreeSet::new(),
        text_extensions: vec![".txt".into()],
        include_files: ["Makefile", "test.bin"].iter().map(|s| s.to_string()).collect(),
    };
    let result = snapshot(&CaptureBuilder::new(dir.path()).config(config).build()).unwrap();
    assert_eq!(keys(&result), ["Makefile", "test.bin"]);
    assert_eq!(result.files["Makefile"], "all:\n\ttrue\n");
}
#[test]
fn undecodable_bytes_are_replaced() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("latin1.txt"), [b'c', b'a', b'f', 0xe9, b'!']).unwrap();
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(result.files["latin1.txt"], "caf\u{fffd}!");
}
#[test]
fn json_output_round_trips() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    let options = CaptureBuilder::new(dir.path()).build();
    let result = snapshot(&options).unwrap();
    let mut sink = Vec::new();
    capture(&options, &mut sink, OutputFormat::Json).unwrap();
    let parsed: CaptureResult = serde_json::from_slice(&sink).unwrap();
    assert_eq!(parsed, result);
    assert_eq!(keys(&parsed), keys(&result));
    let value: serde_json::Value = serde_json::from_slice(&sink).unwrap();
    assert_eq!(value["tree"], serde_json::Value::String(result.tree.clone()));
    assert_eq!(value["files"]["test.txt"], "test content");
}
#[test]
fn structured_output_is_deterministic() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    fs::create_dir_all(dir.path().join("b/a")).unwrap();
    fs::write(dir.path().join("b/a/z.md"), "# z").unwrap();
    fs::write(dir.path().join("b/y.md"), "# y").unwrap();
    let options = CaptureBuilder::new(dir.path()).build();
    for format in [OutputFormat::Json, OutputFormat::Yaml] {
        let mut first = Vec::new();
        let mut second = Vec::new();
        capture(&options, &mut first, format).unwrap();
        capture(&options, &mut second, format).unwrap();
        assert_eq!(first, second, "{} output differs between runs", format);
    }
}
#[test]
fn yaml_output_holds_tree_and_files() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    let yaml = format_result(&result, OutputFormat::Yaml).unwrap();
    let parsed: CaptureResult = serde_yml::from_str(&yaml).unwrap();
    assert_eq!(parsed, result);
    assert_eq!(keys(&parsed), keys(&result));
}
#[test]
fn text_output_delimits_each_file() {
    let dir = tempdir().unwrap();
    sample_project(dir.path());
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    let text = format_result(&result, OutputFormat::Text).unwrap();
    assert!(text.starts_with(&result.tree));
    assert!(text.contains("\n\n# File: test.txt\n\ntest content"));
    let src = text.find("# File: src/test.py").unwrap();
    let txt = text.find("# File: test.txt").unwrap();
    assert!(src < txt);
    assert!(!text.contains("test.bin"));
}
#[test]
fn root_transform_redirects_the_scan() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("restore-tool");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join("README.md"), "outside src").unwrap();
    fs::write(project.join("src/main.py"), "main()").unwrap();
    let transform = RootTransform::from_rules(vec![("restore-tool".into(), PathBuf::from("src"))]);
    let result = snapshot(
        &CaptureBuilder::new(&project)
            .root_transform(transform.clone())
            .build(),
    )
    .unwrap();
    assert_eq!(keys(&result), ["main.py"]);
    assert_eq!(result.tree.lines().next(), Some("src"));

    fs::remove_dir_all(project.join("src")).unwrap();
    let err = snapshot(&CaptureBuilder::new(&project).root_transform(transform).build())
        .unwrap_err();
    assert!(matches!(err, CaptureError::DirectoryNotFound(ref p) if p.ends_with("src")));
}
#[cfg(unix)]
#[test]
fn symlink_loops_are_visited_once() {
    use std::os::unix::fs::symlink;
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("a")).unwrap();
    fs::write(root.join("a/x.txt"), "x").unwrap();
    symlink(root, root.join("a/loop")).unwrap();
    let result = snapshot(&CaptureBuilder::new(root).follow_links(true).build()).unwrap();
    assert_eq!(keys(&result), ["a/x.txt"]);
    assert_eq!(tree_body(&result), ["└── a", "    └── x.txt"]);
}
#[cfg(unix)]
#[test]
fn two_links_to_one_directory_are_captured_once() {
    use std::os::unix::fs::symlink;
    let outside = tempdir().unwrap();
    let shared = outside.path().join("shared");
    fs::create_dir(&shared).unwrap();
    fs::write(shared.join("f.txt"), "f").unwrap();
    let dir = tempdir().unwrap();
    symlink(&shared, dir.path().join("b1")).unwrap();
    symlink(&shared, dir.path().join("b2")).unwrap();
    let result = snapshot(&CaptureBuilder::new(dir.path()).follow_links(true).build()).unwrap();
    assert_eq!(keys(&result), ["b1/f.txt"]);
    assert_eq!(tree_body(&result), ["└── b1", "    └── f.txt"]);
}
#[cfg(unix)]
#[test]
fn symlinked_directories_are_skipped_without_follow_links() {
    use std::os::unix::fs::symlink;
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("real")).unwrap();
    fs::write(root.join("real/doc.md"), "doc").unwrap();
    symlink(root.join("real"), root.join("alias")).unwrap();
    symlink(root.join("real/doc.md"), root.join("doc-link.md")).unwrap();
    let result = snapshot(&CaptureBuilder::new(root).build()).unwrap();
    assert_eq!(keys(&result), ["doc-link.md", "real/doc.md"]);
    assert_eq!(
        tree_body(&result),
        ["├── doc-link.md", "└── real", "    └── doc.md"]
    );
}
#[cfg(unix)]
#[test]
fn unreadable_file_is_recorded_not_fatal() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, "secret").unwrap();
    fs::write(dir.path().join("open.txt"), "visible").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&locked).is_ok() {
        // privileged users bypass file modes
        return;
    }
    let result = snapshot(&CaptureBuilder::new(dir.path()).build()).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
    assert!(result.files["locked.txt"].starts_with("Error reading file:"));
    assert_eq!(result.files["open.txt"], "visible");
}
