//! Display language selection
//!
//! The one step that owns a prompt. An existing `language.conf` short-circuits
//! it on re-runs; `--reconfigure` forces the prompt again. Non-interactive
//! invocations (provisioning over a pipe, CI) keep the existing choice or
//! fall back to English rather than hanging on a prompt.

use inquire::Select;

use crate::common::fs;
use crate::error::Result;
use crate::registry::StepContext;
use crate::ui;

const LANGUAGE_CONF: &str = "etc/ai-chatbot/language.conf";
const BOOT_MESSAGE_FILE: &str = "var/lib/ai-display/boot-message.txt";

const DEFAULT_LANGUAGE: &str = "en";

/// Supported display languages, as shown in the prompt
const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("ar", "Arabic (العربية)")];

const BOOT_MESSAGE_EN: &str = "AI Robot Ready\n\nPress K1 to talk\nPress K3 for camera\n";
const BOOT_MESSAGE_AR: &str = "الروبوت الذكي جاهز\n\nاضغط K1 للتحدث\nاضغط K3 للكاميرا\n";

pub fn run(ctx: &StepContext) -> Result<()> {
    let conf_path = ctx.target.path(LANGUAGE_CONF);

    let code = if conf_path.is_file() && !ctx.reconfigure {
        let existing = read_language(&conf_path);
        ui::info(&format!(
            "language already configured ({existing}); re-run with --reconfigure to change"
        ));
        existing
    } else {
        let code = choose_language()?;
        fs::write_file(&conf_path, &format!("LANGUAGE={code}\n"))?;
        code
    };

    // boot message shown on the panel until the chatbot takes over
    let message = match code.as_str() {
        "ar" => BOOT_MESSAGE_AR,
        _ => BOOT_MESSAGE_EN,
    };
    fs::write_file(&ctx.target.path(BOOT_MESSAGE_FILE), message)?;

    Ok(())
}

fn choose_language() -> Result<String> {
    if !console::user_attended() {
        ui::info(&format!(
            "no terminal attached; defaulting display language to '{DEFAULT_LANGUAGE}'"
        ));
        return Ok(DEFAULT_LANGUAGE.to_string());
    }

    let options: Vec<String> = LANGUAGES
        .iter()
        .map(|(code, name)| format!("{name} [{code}]"))
        .collect();
    let picked = Select::new("Display language:", options.clone()).prompt()?;

    let index = options.iter().position(|o| *o == picked).unwrap_or(0);
    Ok(LANGUAGES[index].0.to_string())
}

fn read_language(conf_path: &std::path::Path) -> String {
    std::fs::read_to_string(conf_path)
        .ok()
        .and_then(|content| {
            content
                .lines()
                .find_map(|line| line.strip_prefix("LANGUAGE=").map(str::trim).map(String::from))
        })
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}
