//! Common test utilities for botstrap integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A staged provisioning target for integration tests: a temp root, state
/// directory, and payload directory, wired into the binary via environment
/// overrides so nothing on the host is touched.
#[allow(dead_code)]
pub struct TestTarget {
    /// Temporary directory backing all paths
    pub temp: TempDir,
    /// Staging root files are installed under
    pub root: PathBuf,
    /// Directory holding state.json
    pub state_dir: PathBuf,
    /// Directory holding step payload trees
    pub payload_dir: PathBuf,
}

#[allow(dead_code)]
impl TestTarget {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("root");
        let state_dir = temp.path().join("state");
        let payload_dir = temp.path().join("payload");
        for dir in [&root, &state_dir, &payload_dir] {
            std::fs::create_dir_all(dir).expect("Failed to create target directory");
        }
        Self {
            temp,
            root,
            state_dir,
            payload_dir,
        }
    }

    /// Command for the real botstrap binary, pointed at this target
    // Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("botstrap").expect("botstrap binary not built");
        cmd.env("BOTSTRAP_ROOT", &self.root)
            .env("BOTSTRAP_STATE_DIR", &self.state_dir)
            .env("BOTSTRAP_PAYLOAD_DIR", &self.payload_dir);
        cmd
    }

    /// Write a payload file relative to the payload directory
    pub fn write_payload(&self, path: &str, content: &str) {
        let file_path = self.payload_dir.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create payload parent");
        }
        std::fs::write(&file_path, content).expect("Failed to write payload file");
    }

    /// Seed the state file with completion entries
    pub fn seed_state(&self, entries: &[(&str, &str)]) {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(id, ts)| ((*id).to_string(), serde_json::Value::from(*ts)))
            .collect();
        let content =
            serde_json::to_string_pretty(&map).expect("Failed to serialize seed state");
        std::fs::write(self.state_dir.join("state.json"), content)
            .expect("Failed to write seed state");
    }

    /// Raw contents of the state file
    pub fn state_json(&self) -> String {
        std::fs::read_to_string(self.state_dir.join("state.json"))
            .expect("Failed to read state file")
    }

    /// Check a file exists under the staging root
    pub fn installed(&self, path: &str) -> bool {
        self.root.join(path).exists()
    }
}
