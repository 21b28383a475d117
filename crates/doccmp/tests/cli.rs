use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn doccmp(dir: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("doccmp").into();
    cmd.current_dir(dir);
    cmd.env_remove("DOCCMP_LANGUAGE");
    cmd.env_remove("DOCCMP_STOPWORDS");
    cmd.env_remove("DOCCMP_MAX_UPLOAD_BYTES");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd: Command = cargo_bin_cmd!("doccmp").into();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("doccmp"));
}

// --- Compare ---

#[test]
fn compare_identical_text() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "a.txt", "Olá Mundo".as_bytes());
    write_file(&tmp, "b.txt", "Olá Mundo".as_bytes());

    doccmp(tmp.path())
        .args(["compare", "a.txt", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1.0000"));
}

#[test]
fn compare_disjoint_text() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "a.txt", "gatos dormem no telhado".as_bytes());
    write_file(&tmp, "b.txt", "bolsa de valores despencou".as_bytes());

    doccmp(tmp.path())
        .args(["compare", "a.txt", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.0000"));
}

#[test]
fn compare_digits_only_scores_zero() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "digits.txt", b"123 456 !!!");
    write_file(&tmp, "prose.txt", "Relatório anual de vendas".as_bytes());

    doccmp(tmp.path())
        .args(["compare", "digits.txt", "prose.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.0000"));
}

#[test]
fn compare_json_output() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "a.txt", "Olá Mundo".as_bytes());
    write_file(&tmp, "b.txt", "Olá Mundo".as_bytes());

    let output = doccmp(tmp.path())
        .args(["compare", "a.txt", "b.txt", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["document_a"], "a.txt");
    assert_eq!(json["document_b"], "b.txt");
    assert!((json["score"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn compare_unsupported_format() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "notes.xyz", b"hello");
    write_file(&tmp, "b.txt", b"hello");

    doccmp(tmp.path())
        .args(["compare", "notes.xyz", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported_format"));
}

#[test]
fn compare_malformed_pdf() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "broken.pdf", b"%PDF-1.4 garbage");
    write_file(&tmp, "b.txt", b"hello");

    doccmp(tmp.path())
        .args(["compare", "broken.pdf", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extraction_failed"));
}

#[test]
fn compare_missing_file() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "b.txt", b"hello");

    doccmp(tmp.path())
        .args(["compare", "missing.txt", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));
}

// --- Tokens ---

#[test]
fn tokens_drop_stopwords_and_numbers() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "a.txt", "O gato e 42 gatos".as_bytes());

    doccmp(tmp.path())
        .args(["tokens", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("gat\ngat\n"));
}

#[test]
fn tokens_report_empty_stream() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "digits.txt", b"123 456 !!!");

    doccmp(tmp.path())
        .args(["tokens", "digits.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no tokens"));
}

// --- Check ---

#[test]
fn check_embedded_resources() {
    let tmp = TempDir::new().unwrap();

    doccmp(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("portuguese").and(predicate::str::contains("207")));
}

#[test]
fn check_missing_resources() {
    let tmp = TempDir::new().unwrap();

    doccmp(tmp.path())
        .args(["check", "--language", "german"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resource_unavailable"));
}

#[test]
fn stopword_file_override() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "stop.txt", b"the\nand\n");
    write_file(&tmp, "a.txt", b"the cats and the dogs");

    doccmp(tmp.path())
        .args(["tokens", "a.txt", "--language", "english", "--stopwords", "stop.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("cat\ndog\n"));
}

#[test]
fn invalid_language_env() {
    let tmp = TempDir::new().unwrap();

    doccmp(tmp.path())
        .env("DOCCMP_LANGUAGE", "klingon")
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_config"));
}
