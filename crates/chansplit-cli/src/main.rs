use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chansplit_cli::{
    expand_inputs, inspect_single_image, parse_layout, process_single_image, OutputStrategy,
};
use chansplit_cli::report::{self, FileReport};

#[derive(Parser)]
#[command(name = "chansplit")]
#[command(version, about = "Split color images into per-channel grayscale files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split image(s) into R/G/B channel files
    Split {
        /// Input image file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output root directory (default: next to the inputs)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Output layout: "shared" (one Channels directory) or "per-file"
        #[arg(long, value_name = "LAYOUT", default_value = "shared")]
        layout: String,

        /// Copy each original file into its output directory
        #[arg(long)]
        copy_original: bool,

        /// Write a JSON summary of all per-file reports
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Scan subdirectories as well
        #[arg(short, long)]
        recursive: bool,

        /// Enable debug output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify image(s) and report mode, bit depth, and alpha usage
    Inspect {
        /// Input image file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Scan subdirectories as well
        #[arg(short, long)]
        recursive: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split {
            input,
            out,
            layout,
            copy_original,
            json,
            recursive,
            verbose,
        } => cmd_split(input, out, layout, copy_original, json, recursive, verbose),

        Commands::Inspect { input, recursive } => cmd_inspect(input, recursive),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_split(
    input: PathBuf,
    out: Option<PathBuf>,
    layout: String,
    copy_original: bool,
    json: Option<PathBuf>,
    recursive: bool,
    verbose: bool,
) -> Result<(), String> {
    chansplit_core::config::set_verbose(verbose);

    let layout = parse_layout(&layout)?;
    let files = expand_inputs(&input, recursive)?;
    if files.is_empty() {
        return Err(format!(
            "No supported image files found in {}",
            input.display()
        ));
    }

    let strategy = OutputStrategy {
        layout,
        root: out,
        copy_original,
    };

    let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());

    // Strictly sequential: each file is fully classified, reported, and
    // split before the next one is considered, and a failure never aborts
    // the loop
    for file in &files {
        println!("Processing image: {}", file.display());
        let file_report = match process_single_image(file, &strategy) {
            Ok(file_report) => file_report,
            Err(e) => {
                eprintln!("  -> Error: {}", e);
                FileReport::from_error(file, &e)
            }
        };
        reports.push(file_report);
        println!();
    }

    report::print_summary(&reports);

    if let Some(json_path) = json {
        report::write_json_summary(&json_path, &reports)?;
        println!("\nReport saved to: {}", json_path.display());
    }

    let failed = reports
        .iter()
        .filter(|r| r.status == chansplit_core::SeparationStatus::Failed)
        .count();
    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{} files failed to process", failed))
    }
}

fn cmd_inspect(input: PathBuf, recursive: bool) -> Result<(), String> {
    let files = expand_inputs(&input, recursive)?;
    if files.is_empty() {
        return Err(format!(
            "No supported image files found in {}",
            input.display()
        ));
    }

    let mut failed = 0usize;
    for file in &files {
        println!("Inspecting image: {}", file.display());
        if let Err(e) = inspect_single_image(file) {
            eprintln!("  -> Error: {}", e);
            failed += 1;
        }
        println!();
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{} files failed to inspect", failed))
    }
}
