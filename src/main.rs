use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tarefex::{
    cli::{Cli, Command},
    export::Snapshot,
    logging,
    store::Store,
    todo_list::TodoList,
    ui::{self, App},
};
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log, cli.log_level)?;

    let store = Store::initialize(&cli.db);

    match cli.command {
        Some(Command::Export(args)) => {
            let snapshot = Snapshot::capture(&store, args.filter)?;
            println!("{}", snapshot.to_json()?);
            Ok(())
        }
        None => run_tui(store),
    }
}

fn run_tui(store: Store) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("starting task list");
    let mut app = App::new(TodoList::new(store));
    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "terminal loop failed");
        eprintln!("{:?}", err);
    }
    Ok(())
}
