use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ialirt_data_access::{AlgorithmQuery, Client, Config, Instance, LogQuery};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "ialirt-data-access",
    version,
    about = "Query and download logs from the IALIRT data access API"
)]
struct Cli {
    /// URL of the IALIRT API. The default is https://ialirt.dev.imap-mission.com.
    /// This can also be set using the IALIRT_DATA_ACCESS_URL environment variable.
    #[arg(long, global = true)]
    url: Option<String>,
    /// Request timeout in seconds (at least 1).
    #[arg(
        long,
        global = true,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
    /// Print lots of debugging statements
    #[arg(long, global = true, conflicts_with = "verbose")]
    debug: bool,
    /// Add verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List log files for a year, day of year and instance.
    #[command(name = "ialirt-log-query")]
    LogQuery(LogQueryArgs),
    /// Download one log file (skipped if it already exists locally).
    #[command(name = "ialirt-log-download")]
    LogDownload(LogDownloadArgs),
    /// Query the algorithm database by MET range and product name.
    #[command(name = "ialirt-db-query")]
    DbQuery(DbQueryArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InstanceArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<InstanceArg> for Instance {
    fn from(i: InstanceArg) -> Self {
        match i {
            InstanceArg::One => Instance::One,
            InstanceArg::Two => Instance::Two,
        }
    }
}

#[derive(Args, Debug)]
struct LogQueryArgs {
    /// Year of the logs (e.g., 2024).
    #[arg(long)]
    year: String,
    /// Day of year of the logs (e.g., 045).
    #[arg(long)]
    doy: String,
    /// Instance number (e.g., 1).
    #[arg(long, value_enum)]
    instance: InstanceArg,
}

#[derive(Args, Debug)]
struct LogDownloadArgs {
    /// Name of the log file, as returned by ialirt-log-query.
    #[arg(long)]
    filename: String,
    /// Directory to save into (default: the user's downloads directory).
    #[arg(long)]
    downloads_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DbQueryArgs {
    /// Start of the range in mission elapsed time.
    #[arg(long)]
    met_start: String,
    /// End of the range in mission elapsed time.
    #[arg(long)]
    met_end: String,
    /// Product to query (e.g., codicelo_product_1).
    #[arg(long)]
    product_name: String,
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG, when set, overrides the flags.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env(cli.url).with_timeout(Duration::from_secs(cli.timeout));
    log::debug!("using API at {}", config.base_url);
    let client = Client::new(config)?;

    match cli.cmd {
        Command::LogQuery(args) => cmd_log_query(&client, args),
        Command::LogDownload(args) => cmd_log_download(&client, args),
        Command::DbQuery(args) => cmd_db_query(&client, args),
    }
}

fn cmd_log_query(client: &Client, args: LogQueryArgs) -> Result<()> {
    let params = LogQuery::new(args.year, args.doy, args.instance.into());
    let files = client.query(&params)?;
    println!("{}", serde_json::to_string(&files)?);
    Ok(())
}

fn cmd_log_download(client: &Client, args: LogDownloadArgs) -> Result<()> {
    let path = client.download(&args.filename, args.downloads_dir.as_deref())?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_db_query(client: &Client, args: DbQueryArgs) -> Result<()> {
    let params = AlgorithmQuery::new(args.met_start, args.met_end, args.product_name);
    let value = client.algorithm_query(&params)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
