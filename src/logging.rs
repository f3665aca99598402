//! Tracing setup.
//!
//! The list takes over the terminal, so the default destination is a file.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::FmtSubscriber;

/// Where log lines go, and whether they may carry ANSI colors.
fn writer_for(target: &str) -> io::Result<(BoxMakeWriter, bool)> {
    match target {
        "1" | "stdout" => Ok((BoxMakeWriter::new(io::stdout), true)),
        "2" | "stderr" => Ok((BoxMakeWriter::new(io::stderr), true)),
        filename => {
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            Ok((BoxMakeWriter::new(Arc::new(file)), false))
        }
    }
}

/// Install the global subscriber for the given target.
///
/// `target` is "stdout"/"1", "stderr"/"2", or a file path opened for append.
/// A log file that cannot be opened leaves logging off; the application
/// still starts.
pub fn init(target: &str, level: Level) -> Result<()> {
    let (writer, ansi) = match writer_for(target) {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("cannot open log file {target}: {err}; logging disabled");
            return Ok(());
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
