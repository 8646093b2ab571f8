//! ip2region: CLI tool for querying xdb databases.

use clap::{Parser, Subcommand};
use ip2region::{CachePolicy, Searcher, SearcherConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ip2region")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Look up IPv4 regions in an xdb database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the region of one or more IPv4 addresses
    Search {
        /// xdb database file
        #[arg(short, long)]
        db: Option<PathBuf>,

        /// Searcher config file (YAML or JSON)
        #[arg(short, long, conflicts_with = "db")]
        config: Option<PathBuf>,

        /// Access mode: file, vector_index, content or mmap
        #[arg(short, long, default_value = "file", value_parser = parse_policy)]
        policy: CachePolicy,

        /// Addresses to search; read from stdin when omitted
        ips: Vec<String>,
    },

    /// Print the header of an xdb database
    Inspect {
        /// xdb database file
        #[arg(short, long)]
        db: PathBuf,
    },
}

fn parse_policy(s: &str) -> Result<CachePolicy, String> {
    CachePolicy::from_str(s).ok_or_else(|| format!("unknown cache policy: {}", s))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            db,
            config,
            policy,
            ips,
        } => search(db, config, policy, ips),
        Commands::Inspect { db } => inspect(db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn search(
    db: Option<PathBuf>,
    config: Option<PathBuf>,
    policy: CachePolicy,
    ips: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match (config, db) {
        (Some(path), _) => SearcherConfig::load(path)?,
        (None, Some(db)) => SearcherConfig::new(db, policy),
        (None, None) => SearcherConfig {
            cache_policy: policy,
            ..SearcherConfig::default()
        },
    };

    let searcher = Searcher::from_config(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if ips.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let ip = line.trim();
            if ip.is_empty() {
                continue;
            }
            print_region(&searcher, ip, &mut out)?;
        }
    } else {
        for ip in &ips {
            print_region(&searcher, ip, &mut out)?;
        }
    }

    log::debug!("Searches issued {} reads", searcher.io_count());
    searcher.close();
    Ok(())
}

fn print_region(
    searcher: &Searcher,
    ip: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match searcher.search(ip) {
        Ok(Some(region)) => writeln!(out, "{}\t{}", ip, String::from_utf8_lossy(&region))?,
        Ok(None) => writeln!(out, "{}\t(not found)", ip)?,
        // Invalid lines are reported inline
        Err(ip2region::Error::InvalidAddress(_)) => {
            log::warn!("Skipping invalid address {:?}", ip);
            writeln!(out, "{}\t(invalid address)", ip)?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn inspect(db: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let searcher = Searcher::with_file_only(&db)?;
    let header = searcher.header()?;

    println!("File:            {:?}", db);
    println!("Version:         {}", header.version);
    println!("Index policy:    {:?}", header.index_policy);
    println!("Created at:      {}", header.created_at);
    println!("Start index ptr: {}", header.start_index_ptr);
    println!("End index ptr:   {}", header.end_index_ptr);
    println!("Segments:        {}", header.segment_count());

    searcher.close();
    Ok(())
}
