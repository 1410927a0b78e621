use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tds_lambda::cli::{self, BuildOptions, CliError, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "tds")]
#[command(about = "tds - compile grid requests (filter, group-by, sort) into query expression trees")]
#[command(version)]
struct Cli {
    /// Log builder stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Pure,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a grid request into an expression body
    Build {
        /// The request as JSON (reads from stdin if not provided)
        #[arg(short, long)]
        request: Option<String>,

        /// Base body as a JSON array of expressions (defaults to [$data])
        #[arg(short, long)]
        body: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Name of the row variable in generated lambdas
        #[arg(long)]
        row_var: Option<String>,

        /// Name of the aggregated-value variable in reducers
        #[arg(long)]
        agg_var: Option<String>,
    },

    /// List token vocabularies, or one vocabulary by name
    Tokens {
        vocabulary: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            request,
            body,
            format,
            pretty,
            row_var,
            agg_var,
        } => run_build(BuildOptions {
            request,
            body,
            format: match format {
                Format::Json => OutputFormat::Json,
                Format::Pure => OutputFormat::Pure,
            },
            pretty,
            row_variable: row_var,
            aggregation_variable: agg_var,
        }),
        Commands::Tokens { vocabulary: None } => {
            print!("{}", cli::get_tokens_overview());
            Ok(())
        }
        Commands::Tokens {
            vocabulary: Some(name),
        } => cli::get_vocabulary(&name).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .try_init();
}

fn run_build(mut options: BuildOptions) -> Result<(), CliError> {
    if options.request.is_none() && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.request = Some(buffer);
    }

    println!("{}", cli::execute_build(&options)?);
    Ok(())
}
