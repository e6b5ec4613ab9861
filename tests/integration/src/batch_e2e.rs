//! End-to-end batch tests for the `mirror` binary
//!
//! These tests never touch a real rsync or real sudo: both are shadowed
//! by shell scripts written into a temp directory, with the fake `sudo`
//! first on PATH and the fake rsync addressed by absolute path from the
//! job file.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch layout with bin/, conf.d/ and logs/ directories
struct Scratch {
    temp: TempDir,
}

impl Scratch {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        for dir in ["bin", "conf.d", "logs"] {
            fs::create_dir(temp.path().join(dir)).unwrap();
        }

        // A sudo that just runs its argument vector
        write_script(&temp.path().join("bin/sudo"), "#!/bin/sh\nexec \"$@\"\n");
        Self { temp }
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn conf_dir(&self) -> PathBuf {
        self.path().join("conf.d")
    }

    fn log_dir(&self) -> PathBuf {
        self.path().join("logs")
    }

    fn args_log(&self) -> PathBuf {
        self.path().join("rsync-args.log")
    }

    /// Install a fake rsync that records its argument vector and prints
    /// deletion lines only on the dry-run pass.
    fn install_fake_rsync(&self) -> PathBuf {
        let rsync = self.path().join("bin/fake-rsync");
        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{}'\n\
             case \"$*\" in\n\
             *--dry-run*)\n\
             echo 'del. stale/a.txt'\n\
             echo 'del. stale/b.txt'\n\
             echo 'send fresh/c.txt'\n\
             ;;\n\
             *)\n\
             echo 'send fresh/c.txt'\n\
             echo 'rsync error: some files vanished (code 24)'\n\
             ;;\n\
             esac\n",
            self.args_log().display()
        );
        write_script(&rsync, &script);
        rsync
    }

    fn write_job(&self, name: &str, binary: &Path, threshold: u32) {
        let content = format!(
            "[[jobs]]\n\
             name = \"{name}\"\n\
             binary = \"{}\"\n\
             source = \"/data_source/\"\n\
             destination = \"/data_destination/\"\n\
             options = [\"--archive\", \"--archive\", \"--delete\"]\n\
             delete_threshold = {threshold}\n",
            binary.display()
        );
        fs::write(self.conf_dir().join(format!("{name}.toml")), content).unwrap();
    }

    /// Invocation with the fake sudo first on PATH
    fn mirror(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.path().join("bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = Command::cargo_bin("mirror").unwrap();
        cmd.env("PATH", path);
        cmd
    }

    /// Find the per-job JSON report in the log directory
    fn find_report(&self) -> serde_json::Value {
        let path = fs::read_dir(self.log_dir())
            .unwrap()
            .filter_map(|e| e.ok().map(|e| e.path()))
            .find(|p| {
                let name = p.file_name().unwrap().to_string_lossy().into_owned();
                name.ends_with(".json") && !name.ends_with(".summary.json")
            })
            .expect("run report should exist");
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn find_summary(&self) -> serde_json::Value {
        let path = fs::read_dir(self.log_dir())
            .unwrap()
            .filter_map(|e| e.ok().map(|e| e.path()))
            .find(|p| p.to_string_lossy().ends_with(".summary.json"))
            .expect("batch summary should exist");
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }
}

fn write_script(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn invalid_config_dir_exits_one() {
    let scratch = Scratch::new();
    scratch
        .mirror()
        .args(["--config-dir", "/no/such/dir"])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration directory invalid"));
}

#[test]
fn invalid_log_dir_exits_one() {
    let scratch = Scratch::new();
    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", "/no/such/dir"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Log directory invalid"));
}

#[test]
fn print_command_outputs_without_executing() {
    let scratch = Scratch::new();
    let rsync = scratch.install_fake_rsync();
    scratch.write_job("nightly", &rsync, 1);

    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .arg("--print-command")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "sudo {} --archive --delete /data_source/ /data_destination/",
            rsync.display()
        )));

    assert!(
        !scratch.args_log().exists(),
        "print-command mode must not invoke the tool"
    );
    assert_eq!(
        fs::read_dir(scratch.log_dir()).unwrap().count(),
        0,
        "print-command mode must not write artifacts"
    );
}

#[test]
fn gate_strips_delete_end_to_end() {
    let scratch = Scratch::new();
    let rsync = scratch.install_fake_rsync();
    scratch.write_job("nightly", &rsync, 1);

    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .assert()
        .success();

    // Two invocations: dry run with --delete, live pass without it
    let invocations: Vec<String> = fs::read_to_string(scratch.args_log())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(invocations.len(), 2);
    assert!(invocations[0].contains("--dry-run"));
    assert!(invocations[0].contains("--delete"));
    assert!(
        !invocations[1].contains("--delete"),
        "live pass must omit --delete, got: {}",
        invocations[1]
    );
    assert!(!invocations[1].contains("--dry-run"));

    // Report reflects the live pass and carries both error channels
    let report = scratch.find_report();
    assert_eq!(report["countDeletes"], 0);
    assert_eq!(report["hasError"], true);
    let errors: Vec<String> = report["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(errors.iter().any(|e| e.starts_with("rsync error")));
    assert!(errors.contains(
        &"Skipping delete for 2 files. More than 1 deletes requires a manual force.".to_string()
    ));

    // Dry-run log captured the predicted deletions verbatim
    let dry_log = fs::read_dir(scratch.log_dir())
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .find(|p| p.to_string_lossy().ends_with(".rsync.dry_run.log"))
        .expect("dry-run log should exist");
    let dry_content = fs::read_to_string(dry_log).unwrap();
    assert!(dry_content.contains("del. stale/a.txt"));
    assert!(dry_content.contains("del. stale/b.txt"));

    // Summary is keyed by job name with transfer sequences redacted
    let summary = scratch.find_summary();
    let entry = &summary["nightly"];
    assert_eq!(entry["hasError"], true);
    assert!(entry.get("sends").is_none());
    assert!(entry.get("receives").is_none());
    assert_eq!(entry["countSends"], 1);
}

#[test]
fn force_keeps_delete_end_to_end() {
    let scratch = Scratch::new();
    let rsync = scratch.install_fake_rsync();
    scratch.write_job("nightly", &rsync, 1);

    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .arg("--force")
        .assert()
        .success();

    let invocations: Vec<String> = fs::read_to_string(scratch.args_log())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert!(invocations[1].contains("--delete"));

    let report = scratch.find_report();
    let errors = report["errors"].as_array().unwrap();
    assert!(
        !errors
            .iter()
            .any(|e| e.as_str().unwrap().starts_with("Skipping delete")),
        "force must suppress the gate warning"
    );
}

#[test]
fn dry_run_flag_applies_to_live_pass() {
    let scratch = Scratch::new();
    let rsync = scratch.install_fake_rsync();
    scratch.write_job("nightly", &rsync, 0);

    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .arg("--dry-run")
        .assert()
        .success();

    let invocations: Vec<String> = fs::read_to_string(scratch.args_log())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(invocations.len(), 2);
    assert!(invocations[1].contains("--dry-run"));
}

#[test]
fn failing_job_does_not_block_the_rest_of_the_batch() {
    let scratch = Scratch::new();
    let rsync = scratch.install_fake_rsync();

    // The first job's derived log filenames blow past the filesystem's
    // name limit, so binding its artifacts fails before any command runs.
    let unbindable = "x".repeat(300);
    let bad = format!(
        "[[jobs]]\n\
         name = \"{unbindable}\"\n\
         binary = \"{}\"\n\
         source = \"/data_source/\"\n\
         destination = \"/data_destination/\"\n\
         options = [\"--archive\"]\n",
        rsync.display()
    );
    fs::write(scratch.conf_dir().join("10-bad.toml"), bad).unwrap();
    scratch.write_job("good", &rsync, 0);
    fs::rename(
        scratch.conf_dir().join("good.toml"),
        scratch.conf_dir().join("20-good.toml"),
    )
    .unwrap();

    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("aborted"));

    // The failing job never reached its tool; the good job ran both passes
    let invocations = fs::read_to_string(scratch.args_log()).unwrap();
    assert_eq!(invocations.lines().count(), 2);

    // Only the good job has a report and a summary entry
    let report = scratch.find_report();
    assert_eq!(report["jobName"], "good");
    let summary = scratch.find_summary();
    assert!(summary.get("good").is_some());
    assert_eq!(summary.as_object().unwrap().len(), 1);
}

#[test]
fn job_name_filter_runs_single_job() {
    let scratch = Scratch::new();
    let rsync = scratch.install_fake_rsync();
    scratch.write_job("alpha", &rsync, 0);
    scratch.write_job("beta", &rsync, 0);

    scratch
        .mirror()
        .args(["--config-dir", scratch.conf_dir().to_str().unwrap()])
        .args(["--log-dir", scratch.log_dir().to_str().unwrap()])
        .args(["--job-name", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting job: beta"))
        .stdout(predicate::str::contains("Starting job: alpha").not());

    let summary = scratch.find_summary();
    assert!(summary.get("beta").is_some());
    assert!(summary.get("alpha").is_none());
}
