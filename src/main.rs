use clap::Parser;
use cutstock::cli::{Cli, Commands};
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for readable diagnostics
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
    let global = cli.global.clone();
    init_tracing(global.verbose);

    match cli.command {
        Commands::Part(cmd) => cutstock::cli::commands::part::run(cmd, &global),
        Commands::Mat(cmd) => cutstock::cli::commands::mat::run(cmd, &global),
        Commands::Price(cmd) => cutstock::cli::commands::price::run(cmd, &global),
        Commands::Measure(cmd) => cutstock::cli::commands::measure::run(cmd, &global),
        Commands::Quote(cmd) => cutstock::cli::commands::quote::run(cmd, &global),
        Commands::Completions(args) => cutstock::cli::commands::completions::run(args),
    }
}

/// Engine diagnostics go to stderr; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default = if verbose { "cutstock=debug" } else { "cutstock=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
