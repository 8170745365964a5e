//! Audio output configuration
//!
//! Deploys the ALSA config payload and sets the `Speaker` mixer control,
//! which is the control this hardware actually exposes (not `PCM`).

use crate::common::shell;
use crate::error::Result;
use crate::installer;
use crate::registry::StepContext;
use crate::ui;

const SPEAKER_VOLUME: &str = "85%";

pub fn run(ctx: &StepContext) -> Result<()> {
    let outcome = installer::install_if_changed(
        0o644,
        &ctx.target.payload("audio/asound.conf"),
        &ctx.target.path("etc/asound.conf"),
    )?;
    ui::info(&format!("asound.conf: {}", outcome.describe()));

    if ctx.target.is_live() {
        shell::run("amixer", &["set", "Speaker", SPEAKER_VOLUME, "unmute"])?;
        // persist mixer levels across reboots
        shell::run("alsactl", &["store"])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;
    use tempfile::TempDir;

    fn staged_target(temp: &TempDir) -> Target {
        Target::resolve(
            Some(temp.path().join("root")),
            Some(temp.path().join("state")),
            Some(temp.path().join("payload")),
        )
    }

    #[test]
    fn test_deploys_asound_conf_to_staging_root() {
        let temp = TempDir::new().unwrap();
        let target = staged_target(&temp);
        std::fs::create_dir_all(target.payload_dir.join("audio")).unwrap();
        std::fs::write(
            target.payload_dir.join("audio/asound.conf"),
            "pcm.!default { type hw card 0 }\n",
        )
        .unwrap();

        let ctx = StepContext {
            reconfigure: false,
            target: &target,
        };
        run(&ctx).unwrap();
        run(&ctx).unwrap(); // second run is a no-op install

        assert!(target.path("etc/asound.conf").is_file());
    }

    #[test]
    fn test_missing_payload_fails() {
        let temp = TempDir::new().unwrap();
        let target = staged_target(&temp);
        let ctx = StepContext {
            reconfigure: false,
            target: &target,
        };

        assert!(run(&ctx).is_err());
        assert!(!target.path("etc/asound.conf").exists());
    }
}
