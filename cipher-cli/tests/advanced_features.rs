#![allow(missing_docs)]
use std::fs;
use std::process::Command;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn cipher_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cipher-cli"))
}

#[test]
fn test_encryption_table() {
    cipher_cli()
        .args(["encrypt", "--text", "ab", "--table", "caesar", "--shift", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encryption Table - ShiftCipher(1)(ab):"))
        .stdout(predicate::str::contains("|encrypt  |  1  |  2  |"))
        .stdout(predicate::str::contains("|output   |    bc     |"))
        .stdout(predicate::str::ends_with("bc\n"));
}

#[test]
fn test_table_with_steps() {
    cipher_cli()
        .args([
            "encrypt", "--text", "Ab", "--table", "--steps", "--cell-width", "3", "caesar", "--shift", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("|lowercase  |"))
        .stdout(predicate::str::contains("|numeric    | 0 | 1 |"))
        .stdout(predicate::str::contains("|character  | b | c |"));
}

#[test]
fn test_decryption_table() {
    cipher_cli()
        .args(["decrypt", "--text", "bc", "--table", "caesar", "--shift", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decryption Table - ShiftCipher(-1)(bc):"))
        .stdout(predicate::str::contains("|decrypt  |"));
}

#[test]
fn test_steps_require_table() {
    cipher_cli()
        .args(["encrypt", "--text", "ab", "--steps", "caesar", "--shift", "1"])
        .assert()
        .failure();
}

#[test]
fn test_crack_textbook_key() {
    cipher_cli()
        .args(["crack", "--n", "2537", "--e", "13"])
        .assert()
        .success()
        .stdout("p = 43\nq = 59\nd = 937\n");
}

#[test]
fn test_crack_prime_modulus_fails() {
    cipher_cli()
        .args(["crack", "--n", "2539", "--e", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable factorisation"));
}

#[test]
fn test_permutation_covers_every_index() {
    let output = cipher_cli()
        .args(["permutation", "--size", "6"])
        .output()
        .expect("Failed to execute permutation");
    assert!(output.status.success());

    let line = String::from_utf8(output.stdout).unwrap();
    let mut sigma: Vec<usize> = line.trim().split(',').map(|s| s.parse().unwrap()).collect();
    sigma.sort_unstable();
    assert_eq!(sigma, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_config_file_chain() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("chain.json");
    fs::write(
        &config_path,
        r#"{"cipher": "compound", "stages": [
            {"cipher": "shift", "shift": 5},
            {"cipher": "transposition", "sigma": [3, 2, 1, 0, 4]}
        ]}"#,
    )
    .expect("Failed to write config");

    cipher_cli()
        .args(["encrypt", "--text", "hello", "config", "--path"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout("qqjmt\n");

    cipher_cli()
        .args(["decrypt", "--text", "qqjmt", "config", "--path"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    cipher_cli()
        .args(["encrypt", "--text", "hello", "config", "--path"])
        .arg(temp_dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read cipher config"));
}
