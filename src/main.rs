use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cartoonify::models::{DEFAULT_BLOCK_SIZE, DEFAULT_OFFSET};
use cartoonify::{CartoonParams, Cartoonifier, SaveResolution, cartoonified_path, save_image};

#[derive(Parser)]
#[command(name = "cartoonify")]
#[command(version, about = "Turn a photo into a cartoon")]
struct Cli {
    /// Path to input image file (opens the window when omitted)
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Neighbourhood size for adaptive thresholding (odd, at least 3)
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Constant subtracted from the local mean when thresholding
    #[arg(short = 'c', long, default_value_t = DEFAULT_OFFSET, allow_negative_numbers = true)]
    offset: i32,

    /// Where to write the cartoon (default: <stem>_cartoonified.<ext> beside the input)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Save the cartoon at the input's resolution instead of preview size
    #[arg(long)]
    full_resolution: bool,

    /// Save every stage to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Never open the window
    #[arg(long)]
    no_gui: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cartoonify={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Cli) -> anyhow::Result<()> {
    let params = CartoonParams::new(args.block_size, args.offset)?;

    let Some(image_path) = args.image_path.clone() else {
        return launch_gui(&args, params);
    };

    let mut cartoonifier = Cartoonifier::new(&image_path, params)
        .context("Can not find any image. Choose appropriate file")?
        .with_verbose(args.verbose);
    if let Some(debug_dir) = args.debug_out {
        cartoonifier = cartoonifier.with_debug(debug_dir);
    }

    let cartoon = cartoonifier.run()?;

    let resolution = if args.full_resolution {
        SaveResolution::Full
    } else {
        SaveResolution::Preview
    };
    let output = args
        .output
        .unwrap_or_else(|| cartoonified_path(&image_path));
    save_image(cartoon.image_for(resolution), &output)?;

    let image = cartoon.image_for(resolution);
    println!(
        "Image saved by name {} at {} ({}x{})",
        output.file_name().unwrap_or_default().to_string_lossy(),
        output.parent().map(|p| p.display().to_string()).unwrap_or_default(),
        image.width(),
        image.height()
    );

    Ok(())
}

#[cfg(feature = "gui")]
fn launch_gui(args: &Cli, params: CartoonParams) -> anyhow::Result<()> {
    if args.no_gui {
        anyhow::bail!("no IMAGE given and --no-gui set; nothing to do");
    }
    cartoonify::gui::run(params, args.verbose).context("GUI failed")
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_args: &Cli, _params: CartoonParams) -> anyhow::Result<()> {
    anyhow::bail!("no IMAGE given and this build has no GUI; pass an image path")
}
