//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Bulk-export groups.io photo albums to local disk.
///
/// Credentials are supplied via the GIO_USERNAME and GIO_PASSWORD
/// environment variables (a .env loader is not used; export them in the
/// shell or via your process manager).
#[derive(Parser, Debug)]
#[command(name = "gio-export")]
#[command(author, version, about)]
pub struct Args {
    /// `list` to print subscribed groups; a number selects a group by id;
    /// anything else selects by exact group name
    pub selector: String,

    /// Directory under which the group tree is created
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_selector_is_required() {
        let result = Args::try_parse_from(["gio-export"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_list_selector_parses() {
        let args = Args::try_parse_from(["gio-export", "list"]).unwrap();
        assert_eq!(args.selector, "list");
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_numeric_selector_parses() {
        let args = Args::try_parse_from(["gio-export", "12345"]).unwrap();
        assert_eq!(args.selector, "12345");
    }

    #[test]
    fn test_cli_output_dir_flag() {
        let args = Args::try_parse_from(["gio-export", "w6ek", "-o", "/tmp/mirror"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("/tmp/mirror"));

        let args =
            Args::try_parse_from(["gio-export", "w6ek", "--output-dir", "/tmp/mirror"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("/tmp/mirror"));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["gio-export", "w6ek", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["gio-export", "w6ek", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["gio-export", "w6ek", "-q"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["gio-export", "--help"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["gio-export", "--version"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayVersion
        );
    }
}
