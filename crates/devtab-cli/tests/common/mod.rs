//! Common utilities for CLI E2E tests.
//!
//! Every invocation runs the built `devtab` binary with `HOME` pointed at a
//! throwaway directory, so tests never touch the real settings file.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

pub struct Sandbox {
    home: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("Failed to create temp home"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_devtab"));
        cmd.args(args)
            .env("HOME", self.home())
            .env_remove("DEVTAB_ENV")
            .env_remove("DEVTAB_LOG");
        cmd
    }

    /// Invoke a CLI command and return (stdout, stderr, exit code).
    pub fn run_cli(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute CLI command");
        split(output)
    }

    /// Invoke a CLI command with `input` written to its stdin.
    pub fn run_cli_with_input(&self, args: &[&str], input: &str) -> (String, String, i32) {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI command");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        split(child.wait_with_output().expect("Failed to wait for CLI"))
    }

    /// Invoke a CLI command and expect success.
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run_cli(args);
        if code != 0 && !stderr.is_empty() {
            eprintln!("CLI error output: {}", stderr);
        }
        assert_eq!(code, 0, "CLI command failed with code {}: {:?}", code, args);
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn run_cli_failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run_cli(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {:?}", args);
        (stdout, stderr, code)
    }
}

fn split(output: Output) -> (String, String, i32) {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}
