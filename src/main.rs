// conceptty: step-through animations of programming concepts

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use conceptty::config::Config;
use conceptty::logging;
use conceptty::topic::Catalog;
use conceptty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_args();
    logging::init(config.log_file.as_deref())?;

    let mut catalog = Catalog::builtin()?;
    for path in &config.topic_files {
        match catalog.load_file(path) {
            Ok(topic) => info!(id = %topic.id, path = %path.display(), "loaded topic file"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if config.list {
        for topic in catalog.topics() {
            println!("{}", topic.list_entry());
        }
        return Ok(());
    }

    if let Err(e) = catalog.topic(&config.topic) {
        eprintln!("Error: {}", e);
        eprintln!();
        eprintln!("Available topics:");
        for id in catalog.ids() {
            eprintln!("  {}", id);
        }
        std::process::exit(1);
    }

    let mut app = App::new(catalog, &config.topic, config.speed)?;
    if config.autoplay {
        app.play();
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
