use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a phrase and record it in the history
    Translate {
        /// Source language or direction (en, fa, en-fa, fa-en)
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Skip the translation server and use the phrase dictionary only
        #[arg(long)]
        offline: bool,

        /// Do not read the translation back
        #[arg(long)]
        mute: bool,

        /// Text to translate
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Translate each line typed on stdin until end of input
    Listen {
        /// Source language or direction (en, fa, en-fa, fa-en)
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Do not read the translations back
        #[arg(long)]
        mute: bool,
    },

    /// Show how the phrase dictionary resolves a phrase
    Lookup {
        /// Source language or direction (en, fa, en-fa, fa-en)
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Text to look up
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show or clear the translation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recent translations, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Speak a past translation again
    Speak {
        /// Which entry, counting back from the newest (1 = newest)
        #[arg(default_value = "1")]
        n: usize,
    },

    /// Remove all history entries
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Output path
        #[arg(short, long, default_value = "tarjoman.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate() {
        let args = Args::parse_from(["tarjoman", "-v", "translate", "--from", "fa", "حال", "شما"]);
        assert!(args.verbose);
        match args.command {
            Commands::Translate { from, offline, mute, text } => {
                assert_eq!(from, "fa");
                assert!(!offline);
                assert!(!mute);
                assert_eq!(text, vec!["حال", "شما"]);
            }
            _ => panic!("Expected translate command"),
        }
    }

    #[test]
    fn test_translate_requires_text() {
        assert!(Args::try_parse_from(["tarjoman", "translate"]).is_err());
    }

    #[test]
    fn test_parse_history_list() {
        let args = Args::parse_from(["tarjoman", "history", "list", "--limit", "5"]);
        match args.command {
            Commands::History { action: HistoryAction::List { limit } } => assert_eq!(limit, 5),
            _ => panic!("Expected history list"),
        }
    }

    #[test]
    fn test_parse_history_speak() {
        let args = Args::parse_from(["tarjoman", "history", "speak", "3"]);
        match args.command {
            Commands::History { action: HistoryAction::Speak { n } } => assert_eq!(n, 3),
            _ => panic!("Expected history speak"),
        }

        let args = Args::parse_from(["tarjoman", "history", "speak"]);
        assert!(matches!(args.command, Commands::History { action: HistoryAction::Speak { n: 1 } }));
    }
}
