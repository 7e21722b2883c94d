use crate::app::{App, UnrecoverableError};
use crate::args::{Args, Parser};
use crate::exercise::ExerciseList;
use crate::notification::DesktopNotifier;
use crate::persist::FileStore;
use crate::session::State;
use std::path::{Path, PathBuf};
use std::process;

mod app;
mod args;
mod event;
mod exercise;
mod interval;
mod notification;
mod persist;
mod session;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), UnrecoverableError> {
    let data_dir = data_dir(&args);
    std::fs::create_dir_all(&data_dir)?;
    init_logging(&data_dir, args.verbose)?;
    log::info!("starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let store = FileStore::new(data_dir);
    let restored = if args.fresh {
        persist::Restored::default()
    } else {
        match persist::load(&store) {
            Ok(restored) => restored,
            Err(err) => {
                log::error!("failed to read saved settings: {err}");
                persist::Restored::default()
            }
        }
    };

    let mut exercises = ExerciseList::default();
    if let Some(saved) = restored.exercises {
        log::info!("restored {} saved exercises", saved.len());
        exercises.replace_all(saved);
    }

    let interval = args.interval.or(restored.interval).unwrap_or_default();

    let state = State::new(exercises, interval);
    let mut app = App::new(state, Box::new(store), Box::new(DesktopNotifier::new()))?;
    app.run().await
}

fn data_dir(args: &Args) -> PathBuf {
    args.data_dir.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitnudge")
    })
}

/// The terminal is owned by the tui, so logs go to a file instead.
fn init_logging(dir: &Path, verbose: bool) -> Result<(), UnrecoverableError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(dir.join("fitnudge.log"))?)
        .apply()?;

    Ok(())
}
