use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;
use wnb::cli::commands::report::ReportArgs;
use wnb::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(global.verbose);

    match cli.command {
        None => wnb::cli::commands::report::run(ReportArgs::default(), &global),
        Some(Commands::Report(args)) => wnb::cli::commands::report::run(args, &global),
        Some(Commands::Table(args)) => wnb::cli::commands::table::run(args, &global),
        Some(Commands::Aircraft(args)) => wnb::cli::commands::aircraft::run(args),
        Some(Commands::Init(args)) => wnb::cli::commands::init::run(args, &global),
        Some(Commands::Completions(args)) => wnb::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "wnb=debug" } else { "wnb=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
