//! CLI routing integration tests.
//!
//! These tests drive `keysafe_cli::run` in-process with parsed arguments so
//! they never touch the real keychain: only commands that stay away from the
//! store are executed, the rest are checked at the parsing level.

use clap::Parser;
use keysafe_cli::{run, Cli, Commands};
use keysafe_core::Config;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("keysafe").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[tokio::test]
async fn test_cli_version() {
    run(parse(&["version"])).await.unwrap();
}

#[tokio::test]
async fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keysafe.json5");
    let path_arg = path.to_str().unwrap();

    run(parse(&["--config", path_arg, "config", "init"]))
        .await
        .unwrap();
    assert!(path.exists());

    run(parse(&["--config", path_arg, "config", "show"]))
        .await
        .unwrap();

    // A second init without --force must not clobber the file.
    assert!(run(parse(&["--config", path_arg, "config", "init"]))
        .await
        .is_err());
}

#[tokio::test]
async fn test_config_init_force_repairs_broken_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keysafe.json5");
    std::fs::write(&path, "{ this is not json5").unwrap();
    let path_arg = path.to_str().unwrap();

    run(parse(&["--config", path_arg, "config", "init", "--force"]))
        .await
        .unwrap();
    assert!(Config::load(&path).is_ok());
}

#[tokio::test]
async fn test_secret_command_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keysafe.json5");
    std::fs::write(&path, r#"{ default_namespace: "" }"#).unwrap();
    let path_arg = path.to_str().unwrap();

    // Validation fails before any keychain access.
    let result = run(parse(&["--config", path_arg, "get", "ns.auth/token"])).await;
    assert!(result.is_err());
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["keysafe", "frobnicate"]).is_err());
}

#[test]
fn test_key_argument_is_required() {
    assert!(Cli::try_parse_from(["keysafe", "get"]).is_err());
    assert!(matches!(
        parse(&["contains", "ns.auth/token"]).command,
        Commands::Contains(_)
    ));
}
