use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Extended help shown after `salespulse classify --help`.
pub const CLASSIFY_AFTER_HELP: &str = "\
Entity input:
  <path> is a JSON array of objects or a CSV file with a header row.
  Use `-` as the path to read from stdin.

  Metric fields (percent change, number or empty/null):
    metric_12v12  last 12 months vs previous 12
    metric_6v6    last 6 months vs previous 6
    metric_3v3    last 3 months vs previous 3
    metric_2v2    last 2 months vs previous 2 (short-term status)

  Optional fields:
    id, name              passed through untouched
    declining_months      consecutive declining months, used by `alerts`
    is_inactive           true/false; inactive entities never raise alerts

  CSV example:
    id,name,metric_12v12,metric_6v6,metric_3v3,metric_2v2
    S-1,Harbor Street,25,5,5,18

Rules:
  Without `--rules`, SalesPulse reads $SALESPULSE_RULES, then
  $SALESPULSE_HOME/rules.json, then ~/.salespulse/rules.json, and
  otherwise uses the built-in defaults. Partial documents are merged
  field by field with the defaults.
  Run `salespulse rules defaults` for a complete starting document.
";

#[derive(Debug, Parser)]
#[command(
    name = "salespulse",
    version,
    about = "rule-based status classification for stores and products",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Entity file (JSON array or CSV); `-` reads stdin
    pub path: String,
    /// Rules document (JSON); partial documents are merged with defaults
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,
    /// Print JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify every entity and print the statuses
    #[command(after_help = CLASSIFY_AFTER_HELP)]
    Classify {
        #[command(flatten)]
        input: InputArgs,
        /// Only list entities with this long-term status
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
    },
    /// Show why one entity received its status
    Explain {
        #[command(flatten)]
        input: InputArgs,
        /// Entity id to explain
        entity_id: String,
    },
    /// List active entities that need attention, worst first
    Alerts {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Count entities per status
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Rank entities by sales, growth and stability; list inactive ones
    Rankings {
        #[command(flatten)]
        input: InputArgs,
        /// Length of every ranking list (defaults: 30 top, 20 bottom)
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Write classified entities to a dated CSV file
    Export {
        #[command(flatten)]
        input: InputArgs,
        /// Directory for the export file (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// File name prefix; the file is `<name>_<YYYY-MM-DD>.csv`
        #[arg(long)]
        name: Option<String>,
        /// Only write entities with this long-term status
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
    },
    /// Inspect classification rules documents
    #[command(arg_required_else_help = true)]
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// Print the built-in rules document
    Defaults {
        /// Print JSON envelope output
        #[arg(long)]
        json: bool,
    },
    /// Migrate and merge a rules document, then print the effective rules
    Check {
        /// Rules document to check
        path: PathBuf,
        /// Print JSON envelope output
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn wants_json(&self) -> bool {
        match self {
            Self::Classify { input, .. }
            | Self::Explain { input, .. }
            | Self::Alerts { input }
            | Self::Summary { input }
            | Self::Rankings { input, .. }
            | Self::Export { input, .. } => input.json,
            Self::Rules { command } => match command {
                RulesCommand::Defaults { json } | RulesCommand::Check { json, .. } => *json,
            },
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::error::ErrorKind;

    use super::{Commands, RulesCommand, parse_from};

    #[test]
    fn every_verb_parses() {
        let cases: [&[&str]; 9] = [
            &["salespulse", "classify", "stores.csv"],
            &["salespulse", "classify", "stores.csv", "--status", "crash"],
            &["salespulse", "rankings", "stores.csv", "--limit", "10"],
            &["salespulse", "explain", "stores.csv", "S-1"],
            &["salespulse", "alerts", "stores.csv", "--json"],
            &["salespulse", "summary", "-", "--rules", "rules.json"],
            &["salespulse", "export", "stores.csv", "--out-dir", "out", "--name", "stores"],
            &["salespulse", "rules", "defaults"],
            &["salespulse", "rules", "check", "rules.json", "--json"],
        ];

        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok(), "{args:?}");
        }
    }

    #[test]
    fn classify_collects_input_arguments() {
        let parsed = parse_from([
            "salespulse",
            "classify",
            "stores.json",
            "--rules",
            "custom.json",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(cli.command.wants_json());
            if let Commands::Classify { input, status } = cli.command {
                assert_eq!(input.path, "stores.json");
                assert_eq!(input.rules, Some(PathBuf::from("custom.json")));
                assert_eq!(status, None);
            }
        }
    }

    #[test]
    fn rules_check_requires_a_path() {
        let parsed = parse_from(["salespulse", "rules", "check"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn rules_without_subcommand_shows_help() {
        let parsed = parse_from(["salespulse", "rules"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(
                error.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    #[test]
    fn rankings_limit_must_be_a_number() {
        let parsed = parse_from(["salespulse", "rankings", "stores.csv", "--limit", "many"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert!(matches!(
                error.kind(),
                ErrorKind::ValueValidation | ErrorKind::InvalidValue
            ));
        }
    }

    #[test]
    fn explain_requires_an_entity_id() {
        let parsed = parse_from(["salespulse", "explain", "stores.csv"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn rules_defaults_is_text_by_default() {
        let parsed = parse_from(["salespulse", "rules", "defaults"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(!cli.command.wants_json());
            assert!(matches!(
                cli.command,
                Commands::Rules {
                    command: RulesCommand::Defaults { json: false }
                }
            ));
        }
    }
}
