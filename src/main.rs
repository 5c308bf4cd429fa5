use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use huffzip_rust::{CompressionProperties, Result, container::Container};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Mini zip: static Huffman compression of arbitrary files")]
struct Args {
    /// Log debug details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a Huffman container
    Compress {
        /// Source filename
        source_name: PathBuf,
        /// Destination filename
        dest_name: PathBuf,
        /// Also store <dest>.properties describing the compression
        #[arg(short, long, default_value_t = false)]
        properties: bool,
        /// Print the compression summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Restore a file from a Huffman container
    Decompress {
        /// Source container filename
        source_name: PathBuf,
        /// Destination filename
        dest_name: PathBuf,
        /// Compare the output length against <source>.properties
        #[arg(short, long, default_value_t = false)]
        check: bool,
    },
    /// Describe a container without decoding it
    Info {
        /// Container filename
        source_name: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn sidecar(path: &std::path::Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".properties");
    PathBuf::from(name)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compress { source_name, dest_name, properties, json } => {
            let comp_time = Instant::now();
            let (input, container) = huffzip_rust::compress_file(&source_name, &dest_name)?;
            let comp_time = comp_time.elapsed().as_nanos();

            let props = CompressionProperties::of(&input, &container)?;
            if properties {
                props.store(&sidecar(&dest_name))?;
            }
            if json {
                println!("{}", props.to_json()?);
            } else {
                println!(
                    "compressed {} bytes into {} bytes ({:.1}%) in {}ns",
                    props.original_length,
                    props.compressed_length,
                    props.ratio() * 100.0,
                    comp_time
                );
            }
        }
        Command::Decompress { source_name, dest_name, check } => {
            let decomp_time = Instant::now();
            let output = huffzip_rust::decompress_file(&source_name, &dest_name)?;
            let decomp_time = decomp_time.elapsed().as_nanos();

            if check {
                let props = CompressionProperties::load(&sidecar(&source_name))?;
                if props.original_length != output.len() as u64 {
                    return Err(huffzip_rust::Error::Properties(format!(
                        "expected {} bytes, decompressed {}",
                        props.original_length,
                        output.len()
                    )));
                }
            }
            println!("decompressed {} bytes in {}ns", output.len(), decomp_time);
        }
        Command::Info { source_name, json } => {
            let data = std::fs::read(&source_name).map_err(|e| huffzip_rust::Error::IoUnavailable { path: source_name.clone(), source: e })?;
            let container = Container::inspect(&data)?;
            let table = &container.header.table;

            if json {
                let entries: Vec<_> = table.iter().collect();
                let info = serde_json::json!({
                    "symbols": table.len(),
                    "original_length": table.total(),
                    "padding": container.header.padding,
                    "payload_bits": container.payload_bits(),
                    "frequencies": entries,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("symbols          {}", table.len());
                println!("original length  {}", table.total());
                println!("padding          {}", container.header.padding);
                println!("payload bits     {}", container.payload_bits());
                for (symbol, freq) in table.iter() {
                    println!("  {:#04x} {}", symbol, freq);
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
