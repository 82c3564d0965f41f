//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Pick a contact action from a popup list and print its target.
#[derive(Parser, Debug)]
#[command(name = "quickcontact", version)]
pub struct Cli {
    /// Action file to show (defaults to the configured `actions_file`)
    pub actions: Option<PathBuf>,

    /// Print the pick as a JSON object instead of the bare target
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_path_and_json_flag() {
        let cli = Cli::try_parse_from(["quickcontact", "--json", "work.toml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.actions, Some(PathBuf::from("work.toml")));

        let cli = Cli::try_parse_from(["quickcontact"]).unwrap();
        assert!(!cli.json);
        assert_eq!(cli.actions, None);
    }

    #[test]
    fn test_help_is_not_taken_as_a_path() {
        let err = Cli::try_parse_from(["quickcontact", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["quickcontact", "--jsno"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
