use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use routergen::generator::{extra_cg, generate, lan_cg, to_json, to_script, wan_cg, ExportOptions};
use routergen::settings::update_settings_from_file;
use routergen::{command_shortener, Settings, StarState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Part {
    All,
    Lan,
    Wan,
    Extra,
}

/// Generate a RouterOS configuration script from a router state file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Router state (.json, .yaml/.yml or .toml)
    #[arg(short, long, value_name = "FILE")]
    state: PathBuf,

    /// Path to the settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Which part of the configuration to generate
    #[arg(short, long, value_enum, default_value = "all")]
    part: Part,

    /// Emit the section map as JSON instead of a script
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Settings first: they carry the default log filter
    if let Some(path) = &args.config {
        update_settings_from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
    }
    let settings = Settings::current();
    env_logger::init_from_env(Env::default().default_filter_or(settings.common.log_level.as_str()));

    let state = StarState::from_file(&args.state)
        .with_context(|| format!("failed to read router state {}", args.state.display()))?;

    let mut config = match args.part {
        Part::All => generate(&state),
        Part::Lan => lan_cg(&state),
        Part::Wan => wan_cg(&state),
        Part::Extra => extra_cg(&state),
    };
    if settings.export.shorten {
        config = command_shortener(&config);
    }

    let rendered = if args.json {
        to_json(&config)?
    } else {
        let mut options = ExportOptions::from(&settings.export).with_show_config(&state.show_config);
        options.router_model = state.choose.router_model.clone();
        options.identity = state.extra_config.router_identity.clone();
        to_script(&config, &options).context("failed to render script")?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "wrote {} section(s) to {}",
                config.len(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
