/*!
# Waveview

Visualizer for digital line-encoding schemes: NRZ-L, NRZI, AMI,
Pseudoternary, Manchester and Differential Manchester.

## Features

- Desktop GUI with all six waveforms or a single selected scheme
- Random bit sequences for quick experiments
- The last valid bit string is remembered in the configuration file
- Headless encoding (table or JSON) and SVG export

## Usage

### GUI Mode (default)
```bash
waveview
```

### Encode on the command line
```bash
waveview encode --scheme ami --bits 1101 --json
```

### Export SVG files
```bash
waveview render --scheme all --bits 10110010 --output ./exports
```
*/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linecode::{encode, BitSequence, EncodedSignal, Scheme};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod gui;
mod surface;

use config::{visible_schemes, AppConfig};
use gui::WaveviewGui;

#[derive(Parser)]
#[command(name = "waveview")]
#[command(about = "Line-encoding waveform visualizer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "waveview.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the segments produced by one scheme
    Encode {
        /// Scheme selector (nrzl, nrzi, ami, pseudo, manchester, diffmanchester)
        #[arg(short, long)]
        scheme: String,

        /// Bit string (defaults to the last one used)
        #[arg(short, long)]
        bits: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write waveform SVG files
    Render {
        /// Scheme selector, or "all"
        #[arg(short, long, default_value = "all")]
        scheme: String,

        /// Bit string (defaults to the last one used)
        #[arg(short, long)]
        bits: Option<String>,

        /// Surface width in pixels (defaults to the configured export width)
        #[arg(short, long)]
        width: Option<f32>,

        /// Output directory for .svg files (defaults to the configured export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a random bit string
    Random,

    /// Generate configuration file
    Config {
        /// Output path for configuration file
        #[arg(short, long, default_value = "waveview.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr to keep stdout clean for encoded output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Some(Commands::Encode { scheme, bits, json }) => {
            let config = AppConfig::load_or_default(&cli.config);
            let bits = resolve_bits(bits.as_deref(), &config)?;
            run_encode(&scheme, &bits, json)
        }

        Some(Commands::Render { scheme, bits, width, output }) => {
            let config = AppConfig::load_or_default(&cli.config);
            let bits = resolve_bits(bits.as_deref(), &config)?;
            let width = width.unwrap_or(config.render.export_width);
            let output = resolve_output(output, &config);
            let written = export::export_svgs(&output, &bits, &visible_schemes(&scheme), width, &config.render)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }

        Some(Commands::Random) => {
            println!("{}", BitSequence::random(&mut rand::thread_rng()));
            Ok(())
        }

        Some(Commands::Config { output }) => generate_config_file(output),

        None => run_gui(cli.config),
    }
}

/// Bit string from the command line, or the cached one from the configuration
fn resolve_bits(arg: Option<&str>, config: &AppConfig) -> Result<BitSequence> {
    let input = arg.unwrap_or(config.session.last_input.as_str());
    BitSequence::parse(input).with_context(|| format!("Invalid bit string {:?}", input))
}

/// Output directory from the command line, or the configured export directory
fn resolve_output(arg: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(&config.render.export_directory))
}

/// Print one scheme's segments; an unknown selector prints nothing
fn run_encode(selector: &str, bits: &BitSequence, json: bool) -> Result<()> {
    let Some(scheme) = Scheme::from_selector(selector) else {
        debug!(selector, "unknown scheme selector, nothing to encode");
        return Ok(());
    };

    let signal = encode(scheme, bits);
    if json {
        println!("{}", signal.to_json()?);
    } else {
        print!("{}", format_segments(&signal));
    }
    Ok(())
}

/// Plain-text table of a signal's segments
fn format_segments(signal: &EncodedSignal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})  bits: {}", signal.scheme, signal.scheme.rule(), signal.bits);
    let _ = writeln!(out, "{:>4} {:>5} {:>6} {:>11}", "bit", "half", "level", "transition");
    for segment in &signal.segments {
        let half = segment
            .half
            .map(|h| h.index().to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4} {:>5} {:>6} {:>11}",
            segment.bit_index,
            half,
            segment.level.to_string(),
            segment.transition
        );
    }
    out
}

/// Run the GUI application
fn run_gui(config_path: PathBuf) -> Result<()> {
    info!("🖥️ Starting Waveview GUI");

    let config = AppConfig::load_or_default(&config_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.gui.window_width, config.gui.window_height])
            .with_title("Line Encoding Visualizer"),
        ..Default::default()
    };

    eframe::run_native(
        "Waveview",
        options,
        Box::new(|cc| Ok(Box::new(WaveviewGui::new(config, config_path, cc)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))?;

    Ok(())
}

/// Generate a default configuration file
fn generate_config_file(output_path: PathBuf) -> Result<()> {
    let config = AppConfig::new();
    config.save_to_file(&output_path)?;

    println!("✅ Generated configuration file: {}", output_path.display());
    println!("📝 Edit the file to customize settings, then run:");
    println!("   waveview --config {}", output_path.display());

    Ok(())
}
