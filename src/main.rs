use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use huffpack::batch::{compress_batch, jobs_for};
use huffpack::config::CompressionConfig;
use huffpack::{default_output_path, Compressor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Huffman compression for text files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// compress a text file
    Compress {
        input: PathBuf,
        /// output file, defaults to encoded/<stem>_comp.bin next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// decompress a raw packed file with its frequency table
    Decompress {
        input: PathBuf,
        #[arg(short, long)]
        table: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// decompress a raw packed file with its code table
    DecompressCodes {
        input: PathBuf,
        #[arg(short, long)]
        codes: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// decompress a self-contained archive
    Unpack {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// print statistics without writing anything
    Stats {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// compress several files concurrently
    Batch {
        inputs: Vec<PathBuf>,
        #[arg(long)]
        out_dir: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<CompressionConfig> {
    match path {
        Some(path) => CompressionConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(CompressionConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let compressor = Compressor::new(load_config(args.config.as_deref())?);
    let started = Instant::now();

    match args.mode {
        Mode::Compress {
            input,
            output,
            json,
        } => {
            let output = output.unwrap_or_else(|| {
                let dir = input.parent().unwrap_or_else(|| Path::new("")).join("encoded");
                default_output_path(&input, &dir)
            });
            let report = compressor
                .compress_file(&input, &output)
                .with_context(|| format!("compressing {}", input.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Wrote {}", report.output.display());
                for path in &report.companions {
                    println!("Wrote {}", path.display());
                }
                println!("{}", report.stats);
            }
        }
        Mode::Decompress {
            input,
            table,
            output,
        } => {
            let symbols = compressor
                .decompress_file(&input, &table, &output)
                .with_context(|| format!("decompressing {}", input.display()))?;
            println!("Decoded {} symbols into {}", symbols, output.display());
        }
        Mode::DecompressCodes {
            input,
            codes,
            output,
        } => {
            let symbols = compressor
                .decompress_file_with_codes(&input, &codes, &output)
                .with_context(|| format!("decompressing {}", input.display()))?;
            println!("Decoded {} symbols into {}", symbols, output.display());
        }
        Mode::Unpack { input, output } => {
            let symbols = compressor
                .decompress_archive_file(&input, &output)
                .with_context(|| format!("unpacking {}", input.display()))?;
            println!("Decoded {} symbols into {}", symbols, output.display());
        }
        Mode::Stats { input, json } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let compressed = compressor.compress_text(&text)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&compressed.stats)?);
            } else {
                println!("{}", compressed.stats);
            }
        }
        Mode::Batch { inputs, out_dir } => {
            if inputs.is_empty() {
                bail!("no input files given");
            }
            let jobs = jobs_for(&inputs, &out_dir);
            let runtime = tokio::runtime::Runtime::new()?;
            let results = runtime.block_on(compress_batch(Arc::new(compressor), jobs));
            let mut failed = 0;
            for (input, result) in inputs.iter().zip(results) {
                match result {
                    Ok(report) => println!(
                        "{} -> {} (ratio {:.6})",
                        input.display(),
                        report.output.display(),
                        report.stats.ratio
                    ),
                    Err(e) => {
                        failed += 1;
                        eprintln!("{}: {}", input.display(), e);
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} files failed", failed, inputs.len());
            }
        }
    }

    eprintln!(
        "Processing Time: {:.3}ms",
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
