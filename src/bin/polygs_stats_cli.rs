use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use polygs_stats::config::{DEFAULT_BASE, DEFAULT_CHUNKS, DEFAULT_MOTIF_LEN};
use polygs_stats::{run, Base, PolyGsConfig};

/// Count 3' poly-G (or other homopolymer) tails in FASTQ files
#[derive(Parser)]
#[command(name = "polygs-stats", version, about, long_about = None)]
struct Args {
    /// Folder to parse for fastq and/or fastq.gz files (repeatable)
    #[arg(short = 'i', long = "i-folders", required = true)]
    i_folders: Vec<PathBuf>,

    /// Count table output
    #[arg(short = 'o', long = "o-table")]
    o_table: PathBuf,

    /// Number of file chunks counted concurrently
    #[arg(short = 'n', long = "p-chunks", default_value_t = DEFAULT_CHUNKS,
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    p_chunks: usize,

    /// Base whose trailing runs are counted (repeatable)
    #[arg(short = 'b', long = "p-bases", value_enum, default_values_t = [DEFAULT_BASE])]
    p_bases: Vec<Base>,

    /// Number of bases before the start of the run
    #[arg(short = 'm', long = "p-motif-len", default_value_t = DEFAULT_MOTIF_LEN)]
    p_motif_len: usize,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn spinner(color: &str, msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{color}}} {{msg}}");
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"])
        .template(&template)
    {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn main() {
    let args = Args::parse();

    let level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = PolyGsConfig::new(args.i_folders, args.o_table)
        .with_chunks(args.p_chunks)
        .with_bases(args.p_bases)
        .with_motif_len(args.p_motif_len);

    let spinner = spinner("green", "Counting homopolymer tails...");
    match run(&config) {
        Ok(summary) => {
            spinner.finish_with_message(format!(
                "Counted {} reads in {} file(s) over {} chunk(s); {} rows written to {}",
                summary.reads,
                summary.files,
                summary.chunks,
                summary.records,
                config.output.display()
            ));
        }
        Err(e) => {
            spinner.abandon_with_message("Counting failed.");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
