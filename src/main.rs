/// Labeller entry point for native builds.
///
/// Restores the previous session, uploads any paths given on the command
/// line, then reads commands from stdin until `quit` or end of input.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    use labeller::config::AppConfig;
    use labeller::handlers::{Flow, handle_message, write_status};
    use labeller::message::Message;
    use labeller::state::LabelSession;
    use labeller::store::{FileSessionStore, MemorySessionStore, SessionStore};

    let config = AppConfig::default_path()
        .map(|path| AppConfig::load_or_create(&path))
        .unwrap_or_default();
    let preferences = &config.preferences;

    // RUST_LOG still overrides the configured level
    env_logger::Builder::new()
        .filter_level(preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let store: Box<dyn SessionStore> =
        match preferences.session_path().or_else(FileSessionStore::default_path) {
            Some(path) => {
                log::info!("Session file: {:?}", path);
                Box::new(FileSessionStore::new(path))
            }
            None => {
                log::warn!("No data directory available, session will not survive a restart");
                Box::new(MemorySessionStore::new())
            }
        };

    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Ignoring custom catalog: {}", e);
            labeller::model::CategoryCatalog::seed()
        }
    };

    let mut session = LabelSession::restore(store, catalog, preferences.label_depth);
    let export_dir = preferences
        .export_folder()
        .unwrap_or_else(|| PathBuf::from("."));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let startup = if args.is_empty() {
        write_status(&session, &mut out).map(|()| Flow::Continue)
    } else {
        handle_message(&mut session, Message::Upload(args), &mut out, &export_dir)
    };
    if let Err(e) = startup {
        eprintln!("Output error: {}", e);
        return;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let message = match Message::parse(&line) {
            Ok(message) => message,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match handle_message(&mut session, message, &mut out, &export_dir) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                eprintln!("Output error: {}", e);
                break;
            }
        }
        if let Err(e) = out.flush() {
            eprintln!("Output error: {}", e);
            break;
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
