use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ens_search_core::{
    open_item, Catalog, DropdownBuilder, Error as CoreError, FileHistory, HistoryItem,
    HistoryStore, MemHistory, NameType, Navigation, SearchItem,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod picker;
mod theme;

#[derive(Parser)]
#[command(name = "ens-search", version, about = "ENS name search suggestions")]
struct Cli {
    /// History file (overrides settings)
    #[arg(long = "history", value_name = "PATH", global = true)]
    history_file: Option<PathBuf>,
    /// History backend: file (default) or mem (nothing persisted)
    #[arg(long, value_enum, global = true, default_value_t = StoreKind::File)]
    store: StoreKind,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    File,
    Mem,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the suggestions for an input
    Suggest {
        input: String,
        #[arg(long)]
        json: bool,
    },
    /// Open suggestion INDEX for an input and record it in history
    Select {
        input: String,
        index: usize,
        #[arg(long)]
        json: bool,
    },
    /// List recent history entries
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print effective settings and paths
    Config {
        #[arg(long)]
        json: bool,
    },
    /// Interactive search box
    Pick {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// Remove every entry
    Clear,
    /// Keep only the MAX most recent entries
    Prune { max: usize },
    /// Remove a single entry
    Remove { text: String, name_type: NameType },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ENS_SEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = config::load_settings();
    let history_path = cli
        .history_file
        .clone()
        .unwrap_or_else(|| config::history_path(&settings));
    let store: Box<dyn HistoryStore> = match cli.store {
        StoreKind::File => Box::new(FileHistory::new(&history_path)),
        StoreKind::Mem => Box::new(MemHistory::new()),
    };
    let builder =
        DropdownBuilder::new().with_translator(Catalog::with_overrides(settings.strings.clone()));

    match cli.command {
        Commands::Suggest { input, json } => {
            let items = builder.build(&input, &suggestion_history(store.as_ref())?);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for (i, it) in items.iter().enumerate() {
                    println!("{}\t{}\t{}{}", i, it.kind_label(), it.text(), badge(it));
                }
            }
        }
        Commands::Select { input, index, json } => {
            let items = builder.build(&input, &suggestion_history(store.as_ref())?);
            let Some(item) = items.get(index) else {
                bail!("no suggestion at index {} ({} available)", index, items.len());
            };
            let nav = open_item(item, store.as_ref())?;
            if let Some(nav) = &nav {
                after_select(store.as_ref(), &settings, nav)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&nav)?);
            } else {
                match nav {
                    Some(nav) => println!("{}", nav.route),
                    None => println!("nothing to open"),
                }
            }
        }
        Commands::History { action, limit, json } => match action {
            Some(HistoryCommand::Clear) => {
                store.clear()?;
                println!("cleared");
            }
            Some(HistoryCommand::Prune { max }) => {
                let n = store.prune(max)?;
                println!("pruned {}", n);
            }
            Some(HistoryCommand::Remove { text, name_type }) => {
                if store.remove(&text, name_type)? {
                    println!("removed {} ({})", text, name_type);
                } else {
                    bail!("no history entry {} ({})", text, name_type);
                }
            }
            None => {
                let items = store.recent(limit)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&items)?);
                } else {
                    for h in items {
                        println!("{}\t{}\t{}", h.text, h.name_type, h.last_accessed);
                    }
                }
            }
        },
        Commands::Config { json } => {
            let out = serde_json::json!({
                "config_dir": config::config_dir(),
                "settings_path": config::settings_path(),
                "history_path": history_path,
                "settings": settings,
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("config dir:    {}", config::config_dir().display());
                println!("settings file: {}", config::settings_path().display());
                println!("history file:  {}", history_path.display());
                println!("{}", toml::to_string_pretty(&settings)?);
            }
        }
        Commands::Pick { json } => {
            if let Some(nav) = picker::run_picker_default(store.as_ref(), &settings)? {
                after_select(store.as_ref(), &settings, &nav)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&nav)?);
                } else {
                    println!("{}", nav.route);
                }
            }
        }
    }

    Ok(())
}

/// History entries to feed the dropdown. A history file that does not parse
/// is treated as empty so suggestions keep working.
pub(crate) fn suggestion_history(store: &dyn HistoryStore) -> Result<Vec<HistoryItem>> {
    match store.list() {
        Ok(items) => Ok(items),
        Err(CoreError::Json(e)) => {
            tracing::warn!(error = %e, "history is unreadable, ignoring it (`history clear` resets it)");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn after_select(store: &dyn HistoryStore, settings: &config::Settings, nav: &Navigation) -> Result<()> {
    tracing::debug!(route = %nav.route, name_type = %nav.name_type, "opened");
    if let Some(max) = settings.history.max_entries {
        let n = store.prune(max)?;
        if n > 0 {
            tracing::info!(pruned = n, max, "trimmed search history");
        }
    }
    Ok(())
}

fn badge(item: &SearchItem) -> &'static str {
    match item {
        SearchItem::Box { is_valid: false, .. } => "\t(invalid)",
        _ => "",
    }
}
