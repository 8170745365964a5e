//! Target machine layout
//!
//! All paths a step handler touches are resolved through [`Target`], so an
//! alternate root (`--root`, `BOTSTRAP_ROOT`) redirects every write. The
//! integration tests rely on this staging setup.

use std::path::{Path, PathBuf};

/// Default state directory, relative to the target root
const STATE_DIR: &str = "var/lib/botstrap";

/// Default payload location of an installed botstrap package
const PAYLOAD_DIR: &str = "/usr/share/botstrap/payload";

/// Resolved filesystem layout for one run
#[derive(Debug, Clone)]
pub struct Target {
    /// Root all provisioned files are installed under (normally `/`)
    pub root: PathBuf,
    /// Directory holding `state.json`
    pub state_dir: PathBuf,
    /// Directory holding the payload trees steps deploy from
    pub payload_dir: PathBuf,
}

impl Target {
    /// Resolve the layout from CLI/env overrides, falling back to defaults.
    ///
    /// When no state directory is given and the system location under the
    /// root cannot be created (unprivileged run), falls back to the per-user
    /// state directory so Smart Mode still tracks completions.
    pub fn resolve(
        root: Option<PathBuf>,
        state_dir: Option<PathBuf>,
        payload_dir: Option<PathBuf>,
    ) -> Self {
        let root = root.unwrap_or_else(|| PathBuf::from("/"));
        let state_dir = state_dir.unwrap_or_else(|| default_state_dir(&root));
        let payload_dir = payload_dir.unwrap_or_else(|| PathBuf::from(PAYLOAD_DIR));

        Self {
            root,
            state_dir,
            payload_dir,
        }
    }

    /// A path under the target root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// True when provisioning the running system rather than a staging root.
    /// Handlers only touch host state (package manager, systemd, mixer)
    /// on a live target; file deployment goes through [`Target::path`]
    /// either way.
    pub fn is_live(&self) -> bool {
        self.root == Path::new("/")
    }

    /// A path under the payload directory
    pub fn payload(&self, relative: &str) -> PathBuf {
        self.payload_dir.join(relative)
    }
}

fn default_state_dir(root: &Path) -> PathBuf {
    let system_dir = root.join(STATE_DIR);
    if std::fs::create_dir_all(&system_dir).is_ok() {
        return system_dir;
    }

    dirs::state_dir()
        .map(|d| d.join("botstrap"))
        .unwrap_or(system_dir)
}
