//! Motor controller service deployment

use crate::common::shell;
use crate::error::Result;
use crate::installer;
use crate::registry::StepContext;
use crate::ui;

const SERVICE_UNIT: &str = "motor-controller.service";

pub fn run(ctx: &StepContext) -> Result<()> {
    let summary = installer::install_tree(
        0o755,
        &ctx.target.payload("motor/opt"),
        &ctx.target.path("opt/motor-controller"),
    )?;
    ui::info(&format!(
        "motor payload: {} file(s) written, {} unchanged",
        summary.changed(),
        summary.unchanged
    ));

    installer::install_if_changed(
        0o644,
        &ctx.target.payload(&format!("motor/{SERVICE_UNIT}")),
        &ctx.target.path(&format!("etc/systemd/system/{SERVICE_UNIT}")),
    )?;

    if ctx.target.is_live() {
        shell::run("systemctl", &["daemon-reload"])?;
        shell::run("systemctl", &["enable", SERVICE_UNIT])?;
    }

    Ok(())
}
