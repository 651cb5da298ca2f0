// tests/config_test.rs
use git_changerelease::config::{
    load_config, load_config_files, write_default_config, Config, CONFIG_FILE_NAME,
};
use git_changerelease::domain::Severity;
use git_changerelease::ChangeReleaseError;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
match_major = ["^BREAKING"]
match_patch = ["^fix", "^docs"]
ignore_messages = ["^Merge"]
tag_pattern = "release-{version}"
disable_signed_tags = true
pre_commit_commands = ["make dist"]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), None).unwrap();
    assert_eq!(config.match_major, vec!["^BREAKING".to_string()]);
    assert_eq!(config.tag_pattern, "release-{version}");
    assert!(config.disable_signed_tags);
    assert_eq!(config.pre_commit_commands, vec!["make dist".to_string()]);
    // Not in the file, so the default is kept
    assert_eq!(config.release_commit_message, "Prepared release {tag}");

    let classifier = config.classifier().unwrap();
    assert!(classifier.is_ignored("Merge branch 'x'"));
    assert_eq!(classifier.classify("docs: readme"), Severity::Patch);
    assert_eq!(classifier.classify("BREAKING: drop api"), Severity::Major);
}

#[test]
fn test_explicit_missing_path_is_error() {
    let dir = TempDir::new().unwrap();
    let result = load_config(Some(&dir.path().join("missing.toml")), None);
    assert!(matches!(result, Err(ChangeReleaseError::Config(_))));
}

#[test]
fn test_repository_root_config_is_found() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "release_commit_message = \"Release {version}\"\n",
    )
    .unwrap();

    let config = load_config(None, Some(dir.path())).unwrap();
    assert_eq!(config.release_commit_message, "Release {version}");
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"match_major = \"not a list\"\n").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path()), None);
    assert!(matches!(result, Err(ChangeReleaseError::ConfigParse(_))));
}

#[test]
fn test_written_default_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    write_default_config(&path).unwrap();
    let config = load_config(Some(&path), None).unwrap();

    assert_eq!(config, Config::default());
    config.validate().unwrap();
}

#[test]
fn test_invalid_rule_detected_before_classification() {
    let config = Config {
        match_patch: vec!["^fix(".to_string()],
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(err.stage(), "loading classification rules");
    assert!(err.to_string().contains("^fix("));
}

#[test]
fn test_later_files_override_only_their_keys() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    let home_file = home.path().join(CONFIG_FILE_NAME);
    let repo_file = repo.path().join(CONFIG_FILE_NAME);
    fs::write(
        &home_file,
        "match_major = [\"^BREAK\"]\ndisable_signed_tags = true\ntag_pattern = \"rel-{version}\"\n",
    )
    .unwrap();
    fs::write(
        &repo_file,
        "ignore_messages = [\"^Merge\"]\ntag_pattern = \"v{version}\"\n",
    )
    .unwrap();

    let config = load_config_files(&[home_file, repo_file]).unwrap();

    // From the home file
    assert_eq!(config.match_major, vec!["^BREAK".to_string()]);
    assert!(config.disable_signed_tags);
    // From the repository file
    assert_eq!(config.ignore_messages, vec!["^Merge".to_string()]);
    // Set by both, the later file wins
    assert_eq!(config.tag_pattern, "v{version}");
    // Set by neither
    assert_eq!(config.match_patch, Config::default().match_patch);
}

#[test]
fn test_explicit_path_layers_over_repository_config() {
    let repo = TempDir::new().unwrap();
    fs::write(
        repo.path().join(CONFIG_FILE_NAME),
        "release_commit_message = \"Release {version}\"\ndisable_signed_tags = true\n",
    )
    .unwrap();
    let mut explicit = NamedTempFile::new().unwrap();
    explicit
        .write_all(b"release_commit_message = \"Ship {tag}\"\n")
        .unwrap();
    explicit.flush().unwrap();

    let config = load_config(Some(explicit.path()), Some(repo.path())).unwrap();
    assert_eq!(config.release_commit_message, "Ship {tag}");
    assert!(config.disable_signed_tags);
}

#[test]
fn test_missing_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    let config = load_config_files(&[dir.path().join("absent.toml")]).unwrap();
    assert_eq!(config, Config::default());
}
