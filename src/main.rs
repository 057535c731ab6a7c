use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use zigbee_ota_images::extract::{self, AppContext};
use zigbee_ota_images::manifest::DEFAULT_MANIFEST_URL;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the firmware feed and extract every signed OTA image
    Fetch {
        #[arg(long, default_value = DEFAULT_MANIFEST_URL)]
        manifest_url: String,
        #[arg(long, default_value = "images")]
        output_dir: PathBuf,
        #[arg(long, default_value = "temp")]
        temp_dir: PathBuf,
        /// Keep downloaded files
        #[arg(long)]
        keep_temp: bool,
    },
    /// Extract the OTA image from a local file
    Extract {
        input_target: PathBuf,
        output_folder: PathBuf,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();
    println!("zigbee-ota-images OTA image extractor");
    let args = Args::parse();

    match args.command {
        Command::Fetch { manifest_url, output_dir, temp_dir, keep_temp } => {
            println!("Manifest: {}", manifest_url);
            println!("Output folder: {}", output_dir.display());

            let app_ctx = AppContext { output_dir, temp_dir, keep_temp };
            let summary = extract::fetch_all(&app_ctx, &manifest_url)?;
            if summary.failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Extract { input_target, output_folder } => {
            println!("Input target: {}", input_target.display());
            println!("Output folder: {}", output_folder.display());
            println!();

            extract::extract_file(&input_target, &output_folder)?;
            println!("\nExtraction finished!");
        }
    }

    Ok(ExitCode::SUCCESS)
}
