//! Hand-rolled command-line flag parsing.
//!
//! The surface is deliberately tiny (a handful of boolean flags plus one
//! valued flag), so this walks `std::env::args` by hand instead of pulling
//! in an argument-parsing crate. Each flag has a short `-x` form and a long
//! `--flag` form; the valued flag accepts both `-m <n>` and `--msaa=<n>`.

use super::Options;

/// Flags parsed from the command line, applied on top of file options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `-h` / `--help`: print usage and exit.
    pub help: bool,
    /// `-f` / `--fullscreen`.
    pub fullscreen: bool,
    /// `-v` / `--vsync`.
    pub vsync: bool,
    /// `-m <n>` / `--msaa=<n>`.
    pub msaa: Option<u32>,
}

impl CliOverrides {
    /// Parse the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message for an unknown flag, a missing
    /// flag value, or a value that does not parse.
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut overrides = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => overrides.help = true,
                "-f" | "--fullscreen" => overrides.fullscreen = true,
                "-v" | "--vsync" => overrides.vsync = true,
                "-m" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "-m expects a value".to_owned())?;
                    overrides.msaa = Some(parse_msaa(&value)?);
                }
                _ => {
                    if let Some(value) = arg.strip_prefix("--msaa=") {
                        overrides.msaa = Some(parse_msaa(value)?);
                    } else {
                        return Err(format!("unknown option: `{arg}`"));
                    }
                }
            }
        }
        Ok(overrides)
    }

    /// Apply the parsed flags on top of `options`.
    pub fn apply(&self, options: &mut Options) {
        if self.fullscreen {
            options.window.fullscreen = true;
        }
        if self.vsync {
            options.window.vsync = true;
        }
        if let Some(msaa) = self.msaa {
            options.window.msaa = msaa;
        }
    }
}

fn parse_msaa(value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("invalid msaa sample count: `{value}`"))
}

/// Usage text for `--help`.
#[must_use]
pub fn usage(program: &str) -> String {
    format!(
        "usage: {program} [--fullscreen] [--vsync] [--msaa=<n>]\n\
         \n\
         \x20 --fullscreen, -f   open the window fullscreen\n\
         \x20 --vsync, -v        synchronize with the display refresh rate\n\
         \x20 --msaa=<n>, -m <n> multisample anti-aliasing sample count\n\
         \x20 --help, -h         print this help text\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOverrides, String> {
        CliOverrides::parse(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn no_arguments_parse_to_defaults() {
        assert_eq!(parse(&[]).unwrap(), CliOverrides::default());
    }

    #[test]
    fn short_and_long_forms_are_equivalent() {
        let short = parse(&["-f", "-v", "-m", "4"]).unwrap();
        let long = parse(&["--fullscreen", "--vsync", "--msaa=4"]).unwrap();
        assert_eq!(short, long);
        assert!(short.fullscreen && short.vsync);
        assert_eq!(short.msaa, Some(4));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn msaa_value_errors() {
        assert!(parse(&["-m"]).is_err());
        assert!(parse(&["--msaa=four"]).is_err());
    }

    #[test]
    fn apply_overrides_file_options() {
        let mut options = Options::default();
        options.window.vsync = false;
        let overrides = parse(&["-v", "--msaa=8"]).unwrap();
        overrides.apply(&mut options);
        assert!(options.window.vsync);
        assert_eq!(options.window.msaa, 8);
        // Flags that were not passed leave the file value alone.
        assert!(!options.window.fullscreen);
    }

    #[test]
    fn usage_names_every_flag() {
        let text = usage("gloam");
        for flag in ["--fullscreen", "--vsync", "--msaa", "--help"] {
            assert!(text.contains(flag));
        }
    }
}
