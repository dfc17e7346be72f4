use std::path::PathBuf;

use mailform::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mailformrc");
    let content = r#"
# comment
--output out.html

--wellness-url https://example.com/book
   
--debug-log=debug.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.output, Some(PathBuf::from("out.html")));
    assert_eq!(flags.wellness_url.as_deref(), Some("https://example.com/book"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mailformrc");
    let content = "--output file.html\n--signup-url https://file.example/join\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "mailform".to_string(),
        "--output".to_string(),
        "cli.html".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(
        effective.output,
        Some(PathBuf::from("cli.html")),
        "cli should override output"
    );
    assert_eq!(
        effective.signup_url.as_deref(),
        Some("https://file.example/join"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_session_options_from_merged_flags() {
    let flags = ConfigFlags {
        wellness_url: Some("https://example.com/book".to_string()),
        ..ConfigFlags::default()
    };
    let options = flags.session_options();
    assert_eq!(options.wellness_url, "https://example.com/book");
    assert!(options.signup_url.starts_with("file:///"));
}
