//! HoyoModManager - command line front end.
//!
//! # Overview
//!
//! Wires the library services to a small set of subcommands:
//! - `categories`: every category of a game with its mod count
//! - `mods <category>`: mod folders of one category and whether they are enabled
//! - `toggle <category> <mod>`: enable or disable one mod
//! - `randomize`: leave one random mod enabled per category
//! - `scaffold`: create the per-category folders
//! - `sync`: write `d3dx_user.ini` values back into the mod files
//!
//! # Configuration Files
//!
//! `HoyoModManager Config.yaml` in the configuration directory (default
//! `HoyoModManager Data/`) holds the game roots. It is created with empty
//! paths on first run.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use hoyomm::models::{ModState, category_from_label};
use hoyomm::{APP_NAME, ConfigManager, GameId, ModStore, OverrideSynchronizer, VERSION};

#[derive(Parser, Debug)]
#[command(name = "hoyomm", version, about = "Manage per-character mods for 3DMigoto games")]
struct Cli {
    /// Directory holding `HoyoModManager Config.yaml`
    #[arg(long, global = true, default_value = "HoyoModManager Data")]
    config_dir: Utf8PathBuf,

    /// Directory for rotating log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: String,

    /// Log at debug level and echo logs to the console
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List categories with their mod counts
    Categories {
        #[arg(long, value_enum, default_value_t = GameId::Genshin)]
        game: GameId,
    },
    /// List the mods of one category
    Mods {
        #[arg(long, value_enum, default_value_t = GameId::Genshin)]
        game: GameId,
        /// Category name, or a `Name (n)` label as printed by `categories`
        category: String,
    },
    /// Enable a disabled mod or disable an enabled one
    Toggle {
        #[arg(long, value_enum, default_value_t = GameId::Genshin)]
        game: GameId,
        category: String,
        /// Folder name, with or without the DISABLED prefix as it is on disk
        mod_name: String,
    },
    /// Enable exactly one random mod per category
    Randomize {
        #[arg(long, value_enum, default_value_t = GameId::Genshin)]
        game: GameId,
        /// Restrict to these categories (default: all)
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Create the base folder and one folder per category
    Scaffold {
        #[arg(long, value_enum, default_value_t = GameId::Genshin)]
        game: GameId,
    },
    /// Copy persisted variable values from d3dx_user.ini into the mod files
    Sync {
        #[arg(long, value_enum, default_value_t = GameId::Genshin)]
        game: GameId,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_guard = hoyomm::logging::setup_logging(&cli.log_dir, "hoyomm", cli.debug, cli.debug)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let user_config = config_manager.load_user_config()?;
    if user_config.debug_mode && !cli.debug {
        log_guard.set_debug(true)?;
    }

    let result = run(cli.command, &user_config);
    if let Err(e) = &result {
        tracing::error!("Command failed: {:#}", e);
    }
    result
}

fn run(command: Commands, user_config: &hoyomm::UserConfig) -> Result<()> {
    match command {
        Commands::Categories { game } => {
            let store = ModStore::new(user_config.layout(game)?);
            for summary in store.category_summaries(game.categories())? {
                println!("{summary}");
            }
        }
        Commands::Mods { game, category } => {
            let store = ModStore::new(user_config.layout(game)?);
            let category = category_from_label(&category);
            for entry in store.list_mods(category)? {
                let marker = match entry.state() {
                    ModState::Enabled => "[x]",
                    ModState::Disabled => "[ ]",
                };
                println!("{} {}", marker, entry.display_name());
            }
        }
        Commands::Toggle {
            game,
            category,
            mod_name,
        } => {
            let store = ModStore::new(user_config.layout(game)?);
            let toggled = store
                .toggle(category_from_label(&category), &mod_name)
                .with_context(|| format!("Failed to toggle {mod_name}"))?;
            let state = if toggled.state().is_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            println!("{} is now {}", toggled.display_name(), state);
        }
        Commands::Randomize { game, categories } => {
            let store = ModStore::new(user_config.layout(game)?);
            let picks = if categories.is_empty() {
                store.randomize(game.categories())?
            } else {
                store.randomize(categories.as_slice())?
            };
            for pick in picks {
                println!("{}: {}", pick.category, pick.display_name());
            }
        }
        Commands::Scaffold { game } => {
            let store = ModStore::new(user_config.layout(game)?);
            store.create_scaffold(game.categories())?;
            println!("Folders created under {}", store.layout().base_dir());
        }
        Commands::Sync { game } => {
            let layout = user_config.layout(game)?;
            let report = OverrideSynchronizer::new().synchronize(
                &layout.override_file(),
                &layout,
                game.categories(),
            )?;

            print_section("Files not found", report.unresolved());
            print_section("Variables not found", report.missing_variables());
            print_section("File errors", report.file_errors());
            println!(
                "Toggles updated! ({} of {} variables)",
                report.updated_count(),
                report.outcomes.len()
            );
        }
    }

    Ok(())
}

fn print_section<T: std::fmt::Display>(title: &str, items: impl Iterator<Item = T>) {
    let lines: Vec<String> = items.map(|item| item.to_string()).collect();
    if lines.is_empty() {
        return;
    }
    println!("{title}:");
    for line in lines {
        println!("  {line}");
    }
}
