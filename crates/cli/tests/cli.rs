use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("book-cli")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("migrate"));
}

#[test]
fn migrate_against_a_scratch_database() {
    let dir = std::env::temp_dir().join(format!("book-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let url = format!("sqlite://{}", dir.join("book.db").display());

    let output = Command::cargo_bin("book-cli")
        .unwrap()
        .arg("migrate")
        .env("BOOK_CONFIG_DIR", &dir)
        .env("BOOK_DATABASE__URL", &url)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("applied 1 migration(s)"));

    std::fs::remove_dir_all(&dir).ok();
}
