use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// The JVM warning both Java validators print on every run
pub const NOISE: &str =
    "WARNING: sun.reflect.Reflection.getCallerClass is not supported. This will impact performance.";

/// ToolsHarness provides an isolated tools directory populated with fake
/// validator scripts, plus a scratch area for SPDX documents.
pub struct ToolsHarness {
    pub dir: TempDir,
    pub tools_dir: PathBuf,
    pub binary: PathBuf,
}

impl ToolsHarness {
    /// Creates an empty tools directory (auto-cleaned on drop)
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let tools_dir = dir.path().join("tools");
        fs::create_dir_all(&tools_dir).expect("Failed to create tools dir");

        ToolsHarness {
            dir,
            tools_dir,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_spdx-verify")),
        }
    }

    /// Creates a harness whose default validators behave like the Java tools:
    /// the new tool reports success behind the JVM warning, the old one
    /// rejects the document on stderr.
    pub fn with_java_tools() -> Self {
        let harness = Self::new();
        harness.add_script(
            "spdx-tools-java.sh",
            &format!("echo OK\necho '{}'\necho\n", NOISE),
        );
        harness.add_script(
            "spdx-tools.sh",
            "echo 'ERROR: bad SPDX-ID' 1>&2\nexit 1\n",
        );
        harness
    }

    /// Writes an executable `/bin/sh` script into the tools directory
    pub fn add_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.tools_dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write script");
        make_executable(&path);
        path
    }

    /// Writes `validators.yaml` into the tools directory
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.tools_dir.join("validators.yaml");
        fs::write(&path, content).expect("Failed to write validator config");
        path
    }

    /// Creates a document file and returns its path as a string
    pub fn document(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, "SPDXVersion: SPDX-2.3\n").expect("Failed to write document");
        path.to_string_lossy().into_owned()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Runs the spdx-verify binary against this harness' tools directory
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary)
            .arg("--tools-dir")
            .arg(&self.tools_dir)
            .args(args)
            .current_dir(self.path())
            .env_remove("SPDX_VERIFY_CONFIG")
            .env_remove("SPDX_VERIFY_TOOLS_DIR")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run spdx-verify")
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to chmod script");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
