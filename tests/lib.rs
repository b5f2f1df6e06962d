//! jpat UI tests, see [runner] for how cases are run.

/// Modules to do with UI tests and running them
mod runner;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Whether or not the UI tests should re-generate the output.
    pub static ref REGENERATE_OUTPUT: bool =
        str::parse::<bool>(std::option_env!("REGENERATE_OUTPUT").unwrap_or("false"))
            .unwrap_or(false);
}

/// This is the ANSI Regular expression matcher. This will match all the
/// specified ANSI escape codes that are used by the [`jpat_reporting`] crate.
pub(crate) const ANSI_RE: &str =
    r"[\x1b\x9b]\[[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]";

lazy_static! {
    pub static ref ANSI_REGEX: Regex = Regex::new(ANSI_RE).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn ensure_regenerate_output_is_disabled() {
        assert!(
            !*REGENERATE_OUTPUT,
            "
        Verify that the `REGENERATE_OUTPUT` module flag is not accidentally left
        on making all of the test cases that observe checker output
        automatically overwrite old results with current ones.
        "
        );
    }

    #[test]
    fn strip_ansi_codes() {
        assert_eq!(ANSI_REGEX.replace_all("\x1b[1;31merror\x1b[0m: title", ""), "error: title");
    }
}
