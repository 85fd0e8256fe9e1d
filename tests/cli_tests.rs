//! Integration tests for the pgparams CLI
//!
//! These tests drive the compiled binary against temporary controller
//! directories and check both the console report and the files on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary
fn pgparams_cmd() -> Command {
    Command::cargo_bin("pgparams").unwrap()
}

const CLIENTES: &str = "\
const pool = require('../config/database');

exports.crear = async (req, res) => {
  const { nombre, telefono, direccion } = req.body;
  const resultado = await pool.query(
    'INSERT INTO clientes (nombre, telefono, direccion) VALUES (?, ?, ?) RETURNING id',
    [nombre, telefono, direccion]
  );
  res.status(201).json({ id: resultado.rows[0].id });
};

exports.obtener = async (req, res) => {
  const cliente = await pool.query(
    'SELECT * FROM clientes WHERE id = ?',
    [req.params.id]
  );
  res.json(cliente.rows[0]);
};
";

const AUTH: &str = "\
const jwt = require('jsonwebtoken');

exports.firmar = (usuario) => jwt.sign({ id: usuario.id }, process.env.JWT_SECRET);
";

/// Creates a controllers directory with one file needing changes and one not
fn create_controllers() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("clientesController.js"), CLIENTES).unwrap();
    fs::write(dir.path().join("authController.js"), AUTH).unwrap();
    fs::write(dir.path().join("notes.txt"), "pool.query('?')\n);\n").unwrap();
    dir
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_cli_help() {
    pgparams_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rewrite"))
        .stdout(predicate::str::contains("print-default-config"));
}

#[test]
fn test_cli_version() {
    pgparams_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgparams"));
}

#[test]
fn test_rewrite_reports_and_rewrites() {
    let dir = create_controllers();

    pgparams_cmd()
        .arg("rewrite")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "clientesController.js - modified (4 placeholder(s) in 2 block(s))",
        ))
        .stdout(predicate::str::contains("authController.js - unchanged"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains("🎉 Done: 1 modified, 1 unchanged"));

    let rewritten = read(dir.path(), "clientesController.js");
    assert!(rewritten.contains("VALUES ($1, $2, $3) RETURNING id"));
    assert!(rewritten.contains("WHERE id = $1'"));
    assert_eq!(read(dir.path(), "authController.js"), AUTH);
    assert_eq!(read(dir.path(), "notes.txt"), "pool.query('?')\n);\n");
}

#[test]
fn test_second_run_is_a_noop() {
    let dir = create_controllers();

    pgparams_cmd().arg("rewrite").arg(dir.path()).assert().success();
    let after_first = read(dir.path(), "clientesController.js");

    pgparams_cmd()
        .arg("rewrite")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("clientesController.js - unchanged"))
        .stdout(predicate::str::contains("🎉 Done: 0 modified, 2 unchanged"));

    assert_eq!(read(dir.path(), "clientesController.js"), after_first);
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let dir = create_controllers();

    pgparams_cmd()
        .args(["rewrite", "--dry-run"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("would be modified"))
        .stdout(predicate::str::contains("dry run, nothing written"));

    assert_eq!(read(dir.path(), "clientesController.js"), CLIENTES);
}

#[test]
fn test_json_report() {
    let dir = create_controllers();

    let output = pgparams_cmd()
        .args(["rewrite", "--format", "json"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["files"], 2);
    assert_eq!(report["summary"]["modified"], 1);
    assert_eq!(report["summary"]["replacements"], 4);
    assert_eq!(report["files"][0]["status"], "unmodified");
    assert_eq!(report["files"][1]["status"], "modified");
}

#[test]
fn test_missing_directory_fails() {
    let dir = tempdir().unwrap();

    pgparams_cmd()
        .arg("rewrite")
        .arg(dir.path().join("controllers"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot access target directory"));
}

#[test]
fn test_invalid_utf8_aborts_without_keep_going() {
    let dir = create_controllers();
    fs::write(dir.path().join("aaaController.js"), [0x70, 0xe9, 0x0a]).unwrap();

    pgparams_cmd()
        .arg("rewrite")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));

    assert_eq!(read(dir.path(), "clientesController.js"), CLIENTES);
}

#[test]
fn test_keep_going_processes_remaining_files() {
    let dir = create_controllers();
    fs::write(dir.path().join("aaaController.js"), [0x70, 0xe9, 0x0a]).unwrap();

    pgparams_cmd()
        .args(["rewrite", "--keep-going"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("aaaController.js - failed"))
        .stdout(predicate::str::contains("clientesController.js - modified"))
        .stderr(predicate::str::contains("1 file(s) could not be processed"));

    assert!(read(dir.path(), "clientesController.js").contains("$3"));
}

#[test]
fn test_balanced_flag_closes_single_line_queries() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("usersController.js"),
        "const r = await pool.query(\"SELECT * FROM users WHERE id = ? AND name = ?\");\nconst x = a ? b : c;\n",
    )
    .unwrap();

    pgparams_cmd()
        .args(["rewrite", "--balanced"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        read(dir.path(), "usersController.js"),
        "const r = await pool.query(\"SELECT * FROM users WHERE id = $1 AND name = $2\");\nconst x = a ? b : c;\n"
    );
}

#[test]
fn test_config_file_is_applied() {
    let dir = create_controllers();
    fs::write(dir.path().join("legacy.mjs"), CLIENTES).unwrap();
    let config_path = dir.path().join("pgparams.yml");
    fs::write(
        &config_path,
        format!("target_dir: {}\nextension: .mjs\n", dir.path().display()),
    )
    .unwrap();

    pgparams_cmd()
        .args(["rewrite", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy.mjs - modified"))
        .stdout(predicate::str::contains("clientesController.js").not());

    assert_eq!(read(dir.path(), "clientesController.js"), CLIENTES);
}

#[test]
fn test_print_default_config() {
    pgparams_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("target_dir: ../src/controllers"))
        .stdout(predicate::str::contains("block_closing: per_line"))
        .stdout(predicate::str::contains("pool.query"));
}

#[test]
fn test_init_and_validate_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".pgparams.yml");

    pgparams_cmd()
        .args(["init-config", "--output"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved to"));

    pgparams_cmd()
        .args(["init-config", "--output"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    pgparams_cmd()
        .args(["validate-config", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("block_closing"));
}

#[test]
fn test_validate_config_rejects_bad_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bad.yml");
    fs::write(&config_path, "triggers: []\n").unwrap();

    pgparams_cmd()
        .args(["validate-config", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}
