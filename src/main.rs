use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use countdown::{enumerate_shapes, Error, Report, Search, MAX_NUMBERS};

/// Find the arithmetic expression over a set of numbers that comes closest
/// to a target.
#[derive(Debug, Parser)]
#[command(name = "countdown", version)]
struct Cli
{
    /// Number of worker threads (default: one per CPU)
    #[arg(short, long)]
    threads: Option<usize>,

    /// The input numbers, followed by the target
    #[arg(required = true, allow_negative_numbers = true, value_name = "NUMBERS... TARGET")]
    values: Vec<i64>
}

/// Print a usage message, and exit.
fn usage(msg: &str) -> !
{
    eprintln!("error: {}", msg);
    eprintln!("{}", Cli::command().render_usage());
    ::std::process::exit(1);
}

fn run(nrs: &[i64], target: i64, threads: Option<usize>) -> countdown::Result<()>
{
    let shapes = enumerate_shapes(nrs.len())?;

    let mut search = Search::new();
    if let Some(threads) = threads
    {
        search = search.threads(threads);
    }
    let solution = search.run(&shapes, nrs, target)?;

    print!("{}", Report { shapes: shapes.len(), target, solution: &solution });
    Ok(())
}

fn main()
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(::std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (target, nrs) = match cli.values.split_last()
    {
        Some((&target, nrs)) => (target, nrs),
        None                 => usage("no target given")
    };
    if nrs.len() < 2
    {
        usage(&Error::TooFewNumbers { count: nrs.len() }.to_string());
    }
    if nrs.len() > MAX_NUMBERS
    {
        usage(&Error::TooManyNumbers { count: nrs.len(), max: MAX_NUMBERS }.to_string());
    }
    if cli.threads == Some(0)
    {
        usage("the number of threads must be positive");
    }

    if let Err(err) = run(nrs, target, cli.threads)
    {
        if err.is_usage()
        {
            usage(&err.to_string());
        }
        eprintln!("error: {}", err);
        ::std::process::exit(1);
    }
}
