//! Binary entry point: logging, options, event loop.

// The --help text is the one place this binary writes to stdout.
#![allow(clippy::print_stdout)]

use std::path::Path;

use gloam::options::{usage, CliOverrides};
use gloam::{Options, Viewer};

// Loaded from the working directory when present; flags override it.
const OPTIONS_FILE: &str = "gloam.toml";

fn main() {
    env_logger::init();

    let program = std::env::args()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name()?.to_str().map(str::to_owned))
        .unwrap_or_else(|| "gloam".to_owned());

    let overrides = match CliOverrides::parse(std::env::args().skip(1)) {
        Ok(overrides) => overrides,
        Err(e) => {
            log::error!("{e}");
            print!("{}", usage(&program));
            std::process::exit(2);
        }
    };
    if overrides.help {
        print!("{}", usage(&program));
        return;
    }

    let mut options = match Options::load_or_default(Path::new(OPTIONS_FILE))
    {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    overrides.apply(&mut options);

    if let Err(e) = Viewer::new(options).run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
