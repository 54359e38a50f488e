//! Integration tests for the Secura CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Secrets are passed as flags or piped on stdin so nothing waits on
//! an interactive prompt, and every run uses its own temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: a `secura` command running inside `dir` as the anonymous user.
fn secura(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("secura").expect("binary should exist");
    cmd.current_dir(dir)
        .env_remove("SECURA_USER")
        .env_remove("SECURA_PASSPHRASE")
        .env_remove("SECURA_LOG");
    cmd
}

fn add_password(dir: &Path, site: &str, password: &str) {
    secura(dir)
        .args([
            "password",
            "add",
            "--site",
            site,
            "--username",
            "ada",
            "--password",
            password,
        ])
        .assert()
        .success();
}

/// Find the single export file for `kind` in `dir`.
fn export_file(dir: &Path, kind: &str) -> PathBuf {
    let prefix = format!("secura-{kind}-");
    let matches: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy().into_owned();
            name.starts_with(&prefix) && name.ends_with(".json")
        })
        .collect();
    assert_eq!(matches.len(), 1, "expected one {kind} export");
    matches.into_iter().next().unwrap()
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password and payment-card vault"))
        .stdout(predicate::str::contains("password"))
        .stdout(predicate::str::contains("card"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("wipe"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("secura"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn add_then_list_and_search() {
    let tmp = TempDir::new().unwrap();
    add_password(tmp.path(), "GitHub", "gh-secret-123");
    add_password(tmp.path(), "Google", "google-secret-456");

    secura(tmp.path())
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Google"))
        .stdout(predicate::str::contains("gh-secret-123").not());

    secura(tmp.path())
        .args(["password", "search", "git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Google").not());

    assert!(tmp
        .path()
        .join(".secura")
        .join("secura_passwords_anonymous")
        .exists());
}

#[test]
fn password_read_from_piped_stdin() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["password", "add", "--site", "Piped", "--username", "ada"])
        .write_stdin("from-stdin-pw\n")
        .assert()
        .success();

    secura(tmp.path())
        .args(["export", "passwords"])
        .assert()
        .success();
    let text = fs::read_to_string(export_file(tmp.path(), "passwords")).unwrap();
    assert!(text.contains("\"password\": \"from-stdin-pw\""));
    assert!(text.contains("\"siteName\": \"Piped\""));
}

#[test]
fn data_dir_flag_is_respected() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args([
            "--data-dir",
            "elsewhere",
            "password",
            "add",
            "--site",
            "GitHub",
            "--username",
            "ada",
            "--password",
            "pw12345678",
        ])
        .assert()
        .success();

    assert!(tmp.path().join("elsewhere/secura_passwords_anonymous").exists());
    assert!(!tmp.path().join(".secura").exists());
}

#[test]
fn users_do_not_see_each_other() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args([
            "--user", "alice", "password", "add", "--site", "AliceSite", "--username", "a",
            "--password", "pw",
        ])
        .assert()
        .success();

    secura(tmp.path())
        .env("SECURA_USER", "bob")
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AliceSite").not());
}

#[test]
fn invalid_user_id_rejected() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["--user", "../etc", "password", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn card_with_short_number_is_rejected() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args([
            "card", "add", "--name", "Main", "--type", "visa", "--holder", "Ada", "--number",
            "123", "--expiry", "07/29", "--cvv", "123",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("15 to 19 digits"));
}

#[test]
fn card_list_masks_numbers() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args([
            "card", "add", "--name", "Main", "--type", "visa", "--holder", "Ada", "--expiry",
            "07/29",
        ])
        .write_stdin("4111111111111111\n123\n")
        .assert()
        .success();

    secura(tmp.path())
        .args(["card", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("************1111"))
        .stdout(predicate::str::contains("4111111111111111").not());
}

#[test]
fn delete_unknown_id_is_not_an_error() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["password", "delete", "no-such-id", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

#[test]
fn show_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["password", "show", "no-such-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn generate_respects_length_and_classes() {
    let tmp = TempDir::new().unwrap();
    let output = secura(tmp.path())
        .args(["generate", "--length", "24", "--no-symbols"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let password = stdout.lines().next().unwrap();
    assert_eq!(password.len(), 24);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn generate_without_classes_fails() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args([
            "generate",
            "--no-uppercase",
            "--no-lowercase",
            "--no-digits",
            "--no-symbols",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character class"));
}

#[test]
fn report_counts_weak_and_reused() {
    let tmp = TempDir::new().unwrap();
    add_password(tmp.path(), "A", "short");
    add_password(tmp.path(), "B", "shared-secret-1");
    add_password(tmp.path(), "C", "shared-secret-1");

    secura(tmp.path())
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weak passwords"))
        .stderr(predicate::str::contains("1 password(s) are shorter than 8"))
        .stderr(predicate::str::contains("2 password(s) are used for more than one"));
}

#[test]
fn export_then_import_into_another_user() {
    let tmp = TempDir::new().unwrap();
    add_password(tmp.path(), "GitHub", "gh-secret-123");

    secura(tmp.path())
        .args(["export", "passwords", "--dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 passwords"));
    let file = export_file(&tmp.path().join("out"), "passwords");

    secura(tmp.path())
        .args(["--user", "u2", "import", "passwords"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 passwords"));

    // Importing the same file again adds nothing.
    secura(tmp.path())
        .args(["--user", "u2", "import", "passwords"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing new to import"));
}

#[test]
fn import_rejects_non_array() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.json"), r#"{"siteName": "x"}"#).unwrap();

    secura(tmp.path())
        .args(["import", "passwords", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn wipe_removes_all_records() {
    let tmp = TempDir::new().unwrap();
    add_password(tmp.path(), "GitHub", "gh-secret-123");

    secura(tmp.path())
        .args(["wipe", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 items"));

    assert!(!tmp
        .path()
        .join(".secura")
        .join("secura_passwords_anonymous")
        .exists());
}

#[test]
fn wipe_without_terminal_keeps_records() {
    let tmp = TempDir::new().unwrap();
    add_password(tmp.path(), "GitHub", "gh-secret-123");

    secura(tmp.path())
        .arg("wipe")
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --force"));

    secura(tmp.path())
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"));
}

#[test]
fn delete_without_terminal_keeps_record() {
    let tmp = TempDir::new().unwrap();
    add_password(tmp.path(), "GitHub", "gh-secret-123");

    secura(tmp.path())
        .args(["password", "delete", "some-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --force"));

    secura(tmp.path())
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"));
}

#[test]
fn xor_codec_from_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".secura.toml"), "codec = \"xor\"\n").unwrap();
    add_password(tmp.path(), "GitHub", "gh-secret-123");

    secura(tmp.path())
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"));
}

#[test]
fn sealed_codec_needs_passphrase() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".secura.toml"),
        "codec = \"sealed\"\nargon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n",
    )
    .unwrap();

    secura(tmp.path())
        .env("SECURA_PASSPHRASE", "right horse")
        .args([
            "password", "add", "--site", "GitHub", "--username", "ada", "--password", "pw",
        ])
        .assert()
        .success();

    secura(tmp.path())
        .env("SECURA_PASSPHRASE", "wrong horse")
        .args(["password", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));

    // The data is still there for the right passphrase.
    secura(tmp.path())
        .env("SECURA_PASSPHRASE", "right horse")
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"));
}

#[test]
fn check_rejects_empty_password_offline() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["check", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn completions_bash_outputs_script() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secura"));
}

#[test]
fn completions_reject_unknown_shell() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'csh'"));
}

#[test]
fn completions_zsh_names_subcommands() {
    let tmp = TempDir::new().unwrap();
    secura(tmp.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef secura"))
        .stdout(predicate::str::contains("password"));
}
