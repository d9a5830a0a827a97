//! Command implementations.

use std::io::Write;

use packrig_config::{profile_for, BuildContext, ProfiledEnvironment};
use serde_json::Value;
use tracing::debug;

use crate::cli::{InspectArgs, PrintArgs, ProjectArgs};
use crate::error::Result;
use crate::ui;

fn load(project: &ProjectArgs) -> Result<ProfiledEnvironment> {
    let profile = profile_for(&project.env)?;
    let ctx = BuildContext::from_process(&project.root, &project.env)?;
    debug!(root = %ctx.root().display(), profile = profile.name(), "building environment");
    Ok(ProfiledEnvironment::new(&ctx, profile)?)
}

/// Write the finalized configuration to stdout.
pub fn print(args: PrintArgs) -> Result<()> {
    let config = load(&args.project)?.finalize()?;

    let rendered = if args.compact {
        serde_json::to_string(&config)?
    } else {
        config.to_json_pretty()?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Summarize what the profile produces, in bundler order, on stdout.
pub fn inspect(args: InspectArgs, no_color: bool) -> Result<()> {
    let env = load(&args.project)?;
    let config = env.to_config()?;
    let entries = config.get("entry").and_then(Value::as_object);

    let mut out = std::io::stdout().lock();
    let profile = env.profile().name();
    ui::heading(&mut out, &format!("profile: {profile}"), no_color)?;

    ui::heading(&mut out, "entries", no_color)?;
    for (name, path) in entries.into_iter().flatten() {
        ui::item(&mut out, name, path.as_str().unwrap_or_default(), no_color)?;
    }

    ui::heading(&mut out, "rules", no_color)?;
    for entry in env.loaders() {
        ui::item(&mut out, &entry.name, &entry.value.test, no_color)?;
    }

    ui::heading(&mut out, "plugins", no_color)?;
    for entry in env.plugins() {
        ui::item(&mut out, &entry.name, entry.value.kind(), no_color)?;
    }

    if let Some(devtool) = config.get("devtool").and_then(Value::as_str) {
        ui::heading(&mut out, "devtool", no_color)?;
        ui::item(&mut out, devtool, "", no_color)?;
    }

    writeln!(
        out,
        "{} entries, {} rules, {} plugins",
        entries.map_or(0, |entries| entries.len()),
        env.loaders().len(),
        env.plugins().len()
    )?;
    drop(out);

    ui::success(&format!("inspected {profile} profile"), no_color);
    Ok(())
}
