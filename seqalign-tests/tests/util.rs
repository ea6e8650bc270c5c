use std::{env, str::FromStr, sync::Once};

use lib_seqalign::alignandum::{Encoder, Sequence};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

static LOGGER: Once = Once::new();

/// Installs a terminal logger once per test binary.
///
/// The level is read from `SEQALIGN_LOG` and defaults to `warn`.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let level = env::var("SEQALIGN_LOG")
            .ok()
            .and_then(|level| LevelFilter::from_str(&level).ok())
            .unwrap_or(LevelFilter::Warn);
        // Another test harness may already have installed a logger.
        let _ = TermLogger::init(
            level,
            Default::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        );
    });
}

#[allow(dead_code)]
pub fn protein(text: &str) -> Sequence {
    Sequence::new(text, &Encoder::protein())
}
