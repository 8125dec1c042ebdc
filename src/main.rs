// src/main.rs

use anyhow::{bail, Context};
use display_shim::{DisplayContext, DisplayError};
use log::{info, warn};
use serde::Serialize;

const USAGE: &str = "usage: display-shim [--display NAME] [--json]";

#[derive(Debug, Default)]
struct Args {
    display: Option<String>,
    json: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--display" | "-d" => {
                let name = iter.next().context("--display needs a value")?;
                args.display = Some(name);
            }
            "--json" => args.json = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other => bail!("unknown argument '{}'\n{}", other, USAGE),
        }
    }
    Ok(args)
}

#[derive(Debug, Serialize)]
struct Report {
    backend: &'static str,
    width: i32,
    height: i32,
    x_display: Option<String>,
    scale_percent: Option<u32>,
}

/// Main entry point for the `display-shim` tool.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = parse_args()?;
    let ctx = DisplayContext::new().context("Failed to initialize display backend")?;
    info!("Display backend: {}", ctx.backend_name());

    if let Some(name) = &args.display {
        ctx.set_x_display_name(name)
            .with_context(|| format!("Failed to target X display '{}'", name))?;
    }

    let size = ctx
        .get_screen_size()
        .context("Failed to query primary display size")?;

    let x_display = match ctx.get_x_display_name() {
        Ok(name) => Some(name),
        Err(e @ DisplayError::UnsupportedPlatform { .. }) => {
            info!("{}", e);
            None
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    };
    let scale_percent = ctx.scale_percent().ok();

    let report = Report {
        backend: ctx.backend_name(),
        width: size.width,
        height: size.height,
        x_display,
        scale_percent,
    };

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("backend:   {}", report.backend);
        println!("size:      {}", size);
        println!(
            "x display: {}",
            report.x_display.as_deref().unwrap_or("(none)")
        );
        match report.scale_percent {
            Some(percent) => println!("scale:     {}%", percent),
            None => println!("scale:     (unknown)"),
        }
    }
    Ok(())
}
