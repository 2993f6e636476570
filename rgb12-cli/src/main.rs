//! rgb12 CLI - inspect and convert 12-bit RGB444 image files
//!
//! Raw interleaved RGB24 files (`RGBRGB...`, row-major, no header) are the
//! interchange format for getting pixels in and out.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_convert, cmd_export, cmd_import, cmd_info, cmd_test};
use log::LevelFilter;
use rgb12_core::Algorithm;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rgb12")]
#[command(author, version, about = "Inspect and convert RGB12 image files")]
#[command(long_about = "
rgb12 stores images with 4 bits per channel, using one of four payload
algorithms: 444 (packed nibbles), huffman, lz77 and grayscale.

Examples:
  rgb12 import photo.raw photo --width 640 --height 480 -a huffman
  rgb12 info photo.rgb12
  rgb12 convert photo.rgb12 small.rgb12 -a lz77
  rgb12 convert photo.rgb12 gray.rgb12 --grayscale
  rgb12 export photo.rgb12 photo12.raw
  rgb12 test *.rgb12
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header information about an .rgb12 file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Encode a raw RGB24 file as .rgb12
    Import {
        /// Raw interleaved RGB24 input
        input: PathBuf,

        /// Output file (.rgb12 is appended when missing)
        output: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Payload algorithm (444, huffman, lz77, grayscale)
        #[arg(short, long, default_value = "444")]
        algorithm: Algorithm,

        /// Convert to grayscale before saving
        #[arg(short, long)]
        grayscale: bool,
    },

    /// Decode an .rgb12 file to raw RGB24
    Export {
        /// .rgb12 input
        input: PathBuf,

        /// Raw interleaved RGB24 output
        output: PathBuf,
    },

    /// Re-encode an .rgb12 file
    Convert {
        /// .rgb12 input
        input: PathBuf,

        /// Output file (.rgb12 is appended when missing)
        output: PathBuf,

        /// Payload algorithm - keeps the input's algorithm if not specified
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Convert to grayscale before saving
        #[arg(short, long)]
        grayscale: bool,
    },

    /// Decode files and report whether they are intact
    #[command(alias = "t")]
    Test {
        /// Files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    ) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Import {
            input,
            output,
            width,
            height,
            algorithm,
            grayscale,
        } => cmd_import(&input, &output, width, height, algorithm, grayscale),
        Commands::Export { input, output } => cmd_export(&input, &output),
        Commands::Convert {
            input,
            output,
            algorithm,
            grayscale,
        } => cmd_convert(&input, &output, algorithm, grayscale),
        Commands::Test { files } => cmd_test(&files, cli.verbose > 0),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
