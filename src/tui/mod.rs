// TUI module for interactive inventory search
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;

use self::terminal::TerminalManager;
use crate::config::Settings;
use crate::session::InventorySession;

/// Run the interactive TUI until the user quits
pub fn run_interactive(settings: Settings) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(InventorySession::new(settings));

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
