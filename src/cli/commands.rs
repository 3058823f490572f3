use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};

use crate::config::{ACCOUNT_LABEL_SUFFIX, Settings};
use crate::indexer::{LoadOutcome, LoadedInventory, rebuild_index};
use crate::logging::{Verbosity, init_subscriber};
use crate::models::{ALL_SCOPE, COIN_ITEM_ID, RowKind, Scope, SearchResults};
use crate::search::search;
use crate::utils::environment::CONFIG_ENV_VAR;
use crate::utils::{format_path_with_tilde, resolve_settings_path, sanitize_label};

const INDENT: &str = "  ";

#[derive(Parser)]
#[command(name = "eq-inventory-search")]
#[command(version)]
#[command(about = "Search item inventories across all of your characters", long_about = None)]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Inventory directory to scan instead of the configured ones (repeatable)
    #[arg(long = "dir", global = true)]
    pub dirs: Vec<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search items by name (case-insensitive regex) or item ID
    Search {
        query: String,

        /// Only show what this character or account holds
        #[arg(short, long)]
        character: Option<String>,

        /// Append item IDs to item names
        #[arg(long)]
        show_ids: bool,

        /// Print the result tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the characters and accounts found in inventory files
    Characters,
    /// Show statistics about the loaded inventories
    Stats,
    /// Interactive search interface
    Tui,
    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Group characters into accounts that share a bank
    #[command(subcommand)]
    Account(AccountCommand),
    /// Exclude characters from aggregation
    #[command(subcommand)]
    Ignore(IgnoreCommand),
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location and contents
    Show,
    /// Add an inventory directory (or the directory of an inventory file)
    AddDir { path: PathBuf },
    /// Remove an inventory directory
    RemoveDir { path: PathBuf },
    /// Whether item IDs are shown next to item names
    ShowIds {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Whether the character list is sorted alphabetically
    SortCharacters {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// List configured accounts
    List,
    /// Put a character on an account, creating the account if needed
    Assign { account: String, character: String },
    /// Take a character off its account
    Unassign { character: String },
    /// Delete an account
    Remove { account: String },
}

#[derive(Subcommand)]
pub enum IgnoreCommand {
    /// List ignored characters
    List,
    /// Ignore a character
    Add { character: String },
    /// Stop ignoring a character
    Remove { character: String },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    // Log lines would tear the alternate screen
    let verbosity = match command {
        Commands::Tui if !cli.verbose => Verbosity::Quiet,
        _ => Verbosity::from_flags(cli.verbose, cli.quiet),
    };
    init_subscriber(verbosity);

    let settings_path = resolve_settings_path(cli.config)?;
    let mut settings = Settings::load(&settings_path)?;

    match command {
        Commands::Search { query, character, show_ids, json } => {
            let settings = with_directories(settings, cli.dirs);
            search_items(&settings, &query, character.as_deref(), show_ids, json)?;
        }
        Commands::Characters => {
            list_characters(&with_directories(settings, cli.dirs));
        }
        Commands::Stats => {
            show_stats(&with_directories(settings, cli.dirs));
        }
        Commands::Tui => {
            crate::tui::run_interactive(with_directories(settings, cli.dirs))?;
        }
        Commands::Config(command) => {
            configure(&mut settings, &settings_path, command)?;
        }
        Commands::Account(command) => {
            manage_accounts(&mut settings, &settings_path, command)?;
        }
        Commands::Ignore(command) => {
            manage_ignored(&mut settings, &settings_path, command)?;
        }
    }

    Ok(())
}

/// Apply `--dir` overrides for this invocation only
fn with_directories(mut settings: Settings, dirs: Vec<PathBuf>) -> Settings {
    if !dirs.is_empty() {
        settings.search_directories = dirs;
    }
    settings
}

/// Run a pass, printing a hint instead of an inventory when there is nothing to load
fn load_inventory(settings: &Settings) -> Option<LoadedInventory> {
    match rebuild_index(settings) {
        LoadOutcome::Loaded(inventory) => Some(inventory),
        LoadOutcome::NoInventory { reason, .. } => {
            println!("{}.", reason);
            println!("Add a directory with: eq-inventory-search config add-dir <PATH>");
            None
        }
    }
}

fn search_items(
    settings: &Settings,
    query: &str,
    character: Option<&str>,
    show_ids: bool,
    json: bool,
) -> Result<()> {
    let Some(inventory) = load_inventory(settings) else {
        return Ok(());
    };

    let scope = character.map_or(Scope::All, Scope::from_label);
    if let Scope::Holder(label) = &scope
        && !inventory.characters.contains(label)
    {
        bail!("Unknown character or account: {}", label);
    }

    let results =
        search(query, &inventory.index, &scope, settings.show_item_ids || show_ids);

    if json {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize results")?;
        println!("{}", json);
    } else {
        for line in render_results(&results) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Lay the result tree out as indented, right-aligned text lines
fn render_results(results: &SearchResults) -> Vec<String> {
    let rows: Vec<(String, Option<u64>)> = results
        .flatten()
        .into_iter()
        .map(|row| {
            let label = format!("{}{}", INDENT.repeat(row.depth), sanitize_label(row.label));
            let count = if row.kind == RowKind::NoResults { None } else { row.count };
            (label, count)
        })
        .collect();

    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let count_width =
        rows.iter().filter_map(|(_, count)| *count).map(|c| c.to_string().len()).max().unwrap_or(0);

    rows.into_iter()
        .map(|(label, count)| match count {
            Some(count) => format!("{:<label_width$}  {:>count_width$}", label, count),
            None => label,
        })
        .collect()
}

fn list_characters(settings: &Settings) {
    let Some(inventory) = load_inventory(settings) else {
        return;
    };

    for label in inventory.characters.iter().filter(|c| *c != ALL_SCOPE) {
        let account = inventory
            .sources
            .iter()
            .find(|source| source.character == *label)
            .and_then(|source| source.account.as_deref());
        match account {
            Some(account) => println!("{}  [{}]", sanitize_label(label), sanitize_label(account)),
            None => println!("{}", sanitize_label(label)),
        }
    }

    if !settings.ignored_characters.is_empty() {
        println!();
        println!("Ignored: {}", settings.ignored_characters.join(", "));
    }
}

fn show_stats(settings: &Settings) {
    let Some(inventory) = load_inventory(settings) else {
        return;
    };

    let items = inventory.index.iter().filter(|item| item.item_id != COIN_ITEM_ID);
    let (distinct, quantity) =
        items.fold((0usize, 0u64), |(n, total), item| {
            (n + 1, total.saturating_add(item.total_count))
        });
    let platinum = inventory.index.get(COIN_ITEM_ID).map_or(0, |coins| coins.total_count);
    let accounts =
        inventory.characters.iter().filter(|c| c.ends_with(ACCOUNT_LABEL_SUFFIX)).count();

    println!("Inventory Statistics");
    println!("====================");
    println!("Distinct items: {}", distinct);
    println!("Total quantity: {}", quantity);
    println!("Platinum: {}", platinum);
    println!("Characters: {}", inventory.characters.len().saturating_sub(1) - accounts);
    println!("Accounts with a shared bank: {}", accounts);
    println!("Files read: {}", inventory.sources.len());
    if !inventory.warnings.is_empty() {
        println!("Warnings: {}", inventory.warnings.len());
    }
    println!();

    println!("Directories:");
    for dir in &settings.search_directories {
        println!("{}{}", INDENT, format_path_with_tilde(dir));
    }

    if let Some(newest) = inventory.sources.iter().max_by_key(|s| s.modified) {
        println!(
            "Newest export: {} ({})",
            sanitize_label(&newest.character),
            newest.modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
    if let Some(oldest) = inventory.sources.iter().min_by_key(|s| s.modified) {
        println!(
            "Oldest export: {} ({})",
            sanitize_label(&oldest.character),
            oldest.modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn configure(settings: &mut Settings, path: &Path, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("Settings file: {}", format_path_with_tilde(path));
            let json =
                serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
            println!("{}", json);
            return Ok(());
        }
        ConfigCommand::AddDir { path: dir } => match settings.add_directory(&dir)? {
            Some(added) => println!("Added {}", format_path_with_tilde(&added)),
            None => {
                println!("Already configured: {}", dir.display());
                return Ok(());
            }
        },
        ConfigCommand::RemoveDir { path: dir } => {
            if !settings.remove_directory(&dir) {
                bail!("Directory is not configured: {}", dir.display());
            }
            println!("Removed {}", dir.display());
        }
        ConfigCommand::ShowIds { enabled } => settings.show_item_ids = enabled,
        ConfigCommand::SortCharacters { enabled } => settings.sort_characters = enabled,
    }

    settings.save(path)
}

fn manage_accounts(settings: &mut Settings, path: &Path, command: AccountCommand) -> Result<()> {
    match command {
        AccountCommand::List => {
            if settings.accounts.is_empty() {
                println!("No accounts configured");
            }
            for account in &settings.accounts {
                println!("{}: {}", account.name, account.characters.join(", "));
            }
            return Ok(());
        }
        AccountCommand::Assign { account, character } => {
            settings.assign_to_account(&account, &character)?;
            println!("{} is now on account {}", character, account);
        }
        AccountCommand::Unassign { character } => {
            if !settings.remove_from_account(&character) {
                bail!("{} is not on any account", character);
            }
            println!("Removed {} from its account", character);
        }
        AccountCommand::Remove { account } => {
            if !settings.remove_account(&account) {
                bail!("No such account: {}", account);
            }
            println!("Removed account {}", account);
        }
    }

    settings.save(path)
}

fn manage_ignored(settings: &mut Settings, path: &Path, command: IgnoreCommand) -> Result<()> {
    match command {
        IgnoreCommand::List => {
            for character in &settings.ignored_characters {
                println!("{}", character);
            }
            return Ok(());
        }
        IgnoreCommand::Add { character } => {
            if !settings.ignore_character(&character) {
                println!("{} is already ignored", character);
                return Ok(());
            }
            println!("Ignoring {}", character);
        }
        IgnoreCommand::Remove { character } => {
            if !settings.unignore_character(&character) {
                bail!("{} is not ignored", character);
            }
            println!("No longer ignoring {}", character);
        }
    }

    settings.save(path)
}
