//! Base system packages every later step depends on

use crate::common::shell;
use crate::error::Result;
use crate::registry::StepContext;
use crate::ui;

/// Runtime, audio tooling, GPIO bindings, and the unpack/download tools the
/// model-fetching steps use
const BASE_PACKAGES: &[&str] = &[
    "python3",
    "python3-pip",
    "python3-libgpiod",
    "alsa-utils",
    "i2c-tools",
    "curl",
    "unzip",
];

pub fn run(ctx: &StepContext) -> Result<()> {
    if !ctx.target.is_live() {
        ui::info("staging root: package installation skipped");
        return Ok(());
    }

    shell::run("apt-get", &["update"])?;

    let mut args = vec!["install", "-y"];
    args.extend_from_slice(BASE_PACKAGES);
    shell::run("apt-get", &args)?;

    Ok(())
}
