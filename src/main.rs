//! Tagtree CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Scan a directory and cache its tree
//! tagtree index ~/Media
//!
//! # Only descend into top-level folders tagged Red or Blue, recording sizes
//! tagtree index ~/Media -t Red -t Blue --stat
//!
//! # Search every cached tree: all terms must match
//! tagtree search 'S01' 'mkv$' @red
//!
//! # Print the shell steps flattening tagged single-file folders
//! tagtree cleanup --tag Blue | sh
//!
//! # Print the steps moving everything tagged Red into ~/Media/Red
//! tagtree gather Red --root ~/Media
//!
//! # Rebuild all cached trees
//! tagtree rescan
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/tagtree/config.toml` on Linux) and `TAGTREE_*` environment
//! variables. Diagnostics go to stderr; `-v` or `RUST_LOG` raise the level.

use std::process::ExitCode;

use tagtree::{
    TagtreeError,
    cache::CacheStore,
    cli::{Cli, Commands},
    commands,
    config::TagtreeConfig,
    search::SearchOptions,
    tagger::TagCommand,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, TagtreeError>;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "tagtree=debug" } else { "tagtree=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Dispatch the parsed command
///
/// # Errors
///
/// Returns `TagtreeError` if the cache cannot be loaded or the command fails.
fn run(cli: Cli, config: TagtreeConfig) -> Result<()> {
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        return commands::config(config, command, quiet);
    }

    let cache_file = cli.cache.clone().unwrap_or_else(|| config.cache_file.clone());
    let mut store = CacheStore::load(cache_file)?;
    let source = TagCommand::new(config.tag_program.clone());

    match cli.command {
        Commands::Index {
            root,
            filter_tags,
            stat,
        } => commands::index(&mut store, &source, &root, &filter_tags, stat, quiet),
        Commands::Rescan { root } => commands::rescan(&mut store, &source, root.as_deref(), quiet),
        Commands::Dump { file } => commands::dump(&store, &file, quiet),
        Commands::Show { root } => commands::show(&store, root.as_deref(), quiet),
        Commands::Roots => commands::roots(&store, quiet),
        Commands::Search {
            terms,
            min_depth,
            case_sensitive,
            no_date_sort,
            include_junk,
            root,
        } => {
            let options = SearchOptions {
                min_depth: min_depth.unwrap_or(config.min_depth),
                date_sort: config.date_sort && !no_date_sort,
                include_junk,
            };
            let ignore_case = config.ignore_case && !case_sensitive;
            commands::search(&store, &terms, ignore_case, &options, root.as_deref(), quiet)
        }
        Commands::Cleanup { tag, root } => {
            commands::cleanup(&store, tag.as_deref(), root.as_deref(), quiet)
        }
        Commands::Gather { tag, root } => commands::gather(&store, &tag, root.as_deref(), quiet),
        Commands::Config { .. } => unreachable!(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let result = TagtreeConfig::load()
        .map_err(TagtreeError::from)
        .and_then(|config| run(cli, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
