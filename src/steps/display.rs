//! Status display deployment
//!
//! Installs the display driver payload and its systemd unit, and enables the
//! SPI interface the panel hangs off. The boot message itself is owned by the
//! language step, since its content depends on the chosen language.

use crate::common::shell;
use crate::error::Result;
use crate::installer;
use crate::registry::StepContext;
use crate::ui;

pub fn run(ctx: &StepContext) -> Result<()> {
    let summary = installer::install_tree(
        0o755,
        &ctx.target.payload("display/opt"),
        &ctx.target.path("opt/ai-display"),
    )?;
    ui::info(&format!(
        "display payload: {} of {} file(s) written",
        summary.changed(),
        summary.total()
    ));

    installer::install_if_changed(
        0o644,
        &ctx.target.payload("display/ai-display.service"),
        &ctx.target.path("etc/systemd/system/ai-display.service"),
    )?;

    if ctx.target.is_live() {
        shell::run("raspi-config", &["nonint", "do_spi", "0"])?;
        shell::run("systemctl", &["daemon-reload"])?;
        shell::run("systemctl", &["enable", "ai-display.service"])?;
    }

    Ok(())
}
