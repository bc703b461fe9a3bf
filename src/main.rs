use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};
use thermodial::feed::{self, FeedClient, HEADER};
use thermodial::render::Scene;
use thermodial::settings::{DEFAULT_SETTINGS_FILE, load_settings};
use thermodial::{DialOptions, HvacState, SizePreset, SvgFile, TemperatureScale, create_dial};

#[derive(Parser, Debug)]
#[command(name = "thermodial", version)]
#[command(about = "Render a thermostat dial as SVG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single dial from command-line values
    Render(RenderArgs),
    /// Poll a thermostat feed and keep an SVG file up to date
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long, default_value = "large")]
    size: SizePreset,

    /// Temperature scale, F or C
    #[arg(long, default_value = "F")]
    scale: TemperatureScale,

    #[arg(long)]
    target: Option<f64>,

    #[arg(long)]
    ambient: Option<f64>,

    /// off, heating or cooling
    #[arg(long)]
    hvac: Option<HvacState>,

    #[arg(long)]
    leaf: bool,

    #[arg(long)]
    away: bool,

    #[arg(long)]
    name: Option<String>,

    /// Leave the stylesheet out of the SVG
    #[arg(long)]
    no_style: bool,

    /// Write here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Override the dial size from the settings file
    #[arg(long)]
    size: Option<SizePreset>,

    /// Override the temperature scale from the settings file
    #[arg(long)]
    scale: Option<TemperatureScale>,

    /// Override the output path from the settings file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Poll once and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Logs go to stderr; stdout may carry the SVG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(args),
        Command::Watch(args) => watch(args).await,
    }
}

fn render(args: RenderArgs) -> miette::Result<()> {
    let options = DialOptions::new()
        .size(args.size)
        .scale(args.scale)
        .embed_style(!args.no_style);
    let mut dial = create_dial(|_: &Scene| {}, options)?;

    if let Some(target) = args.target {
        dial.set_target_temperature(target);
    }
    if let Some(ambient) = args.ambient {
        dial.set_ambient_temperature(ambient);
    }
    if let Some(hvac) = args.hvac {
        dial.set_hvac_state(hvac);
    }
    if let Some(name) = args.name {
        dial.set_name(name);
    }
    dial.set_has_leaf(args.leaf);
    dial.set_away(args.away);

    let svg = dial.to_svg_string()?;
    match args.output {
        Some(path) => std::fs::write(&path, svg)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => println!("{svg}"),
    }
    Ok(())
}

async fn watch(args: WatchArgs) -> miette::Result<()> {
    let mut settings = load_settings(&args.config)?;
    if let Some(size) = args.size {
        settings.dial.size = size;
    }
    if let Some(scale) = args.scale {
        settings.dial.temperature_scale = scale;
    }
    let output = args.output.unwrap_or_else(|| settings.output.path.clone());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }

    let mut dial = create_dial(SvgFile::new(&output), settings.dial.to_options()?)?;
    if let Some(name) = &settings.dial.name {
        dial.set_name(name.clone());
    }

    let client = FeedClient::new(settings.feed.source()?)?;
    tracing::info!(
        source = client.source().name(),
        output = %output.display(),
        "watching thermostat feed"
    );

    let mut on_update = |update: feed::FeedUpdate| {
        update.apply_to(&mut dial);
        tracing::info!("{}\n{}", HEADER, update.summary());
    };

    if args.once {
        if !feed::poll_once(&client, &mut on_update).await {
            miette::bail!("{}: Could not load temperature.", client.source().name());
        }
        return Ok(());
    }

    feed::poll(&client, settings.feed.poll_interval(), on_update).await;
    Ok(())
}
