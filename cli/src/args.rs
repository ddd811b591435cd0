use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "love", version)]
#[command(about = "Send love from the command line")]
#[command(long_about = "Send love, read love history and look up usernames on a Yelp Love \
instance.\n\n\
Environment Variables:\n\
  LOVE_API_KEY    API key from the admin section of the site (required)\n\
  LOVE_BASE_URL   API root including the /api suffix, e.g. https://cwrulove.appspot.com/api\n\
  LOVE_SENDER     Username to send love as\n\
  LOVE_TIMEOUT    Request timeout in seconds\n\
  RUST_LOG        Log filter, overrides -v")]
pub struct Args {
    /// API key used for every request
    #[arg(long, env = "LOVE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// API root, without a trailing slash
    #[arg(long, env = "LOVE_BASE_URL")]
    pub base_url: String,

    /// Give up on a request after this many seconds
    #[arg(long, env = "LOVE_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send love to one or more recipients
    Send {
        /// Username to send love as
        #[arg(long, env = "LOVE_SENDER")]
        sender: String,

        /// Recipient username, or several joined by commas
        recipients: String,

        /// The message; remaining words are joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// Show love sent by and/or to a user
    History {
        /// Only love sent by this user
        #[arg(long = "from", default_value = "")]
        sender: String,

        /// Only love received by this user
        #[arg(long = "to", default_value = "")]
        recipient: String,

        /// Maximum number of loves to fetch; 0 for no limit
        #[arg(long, default_value_t = 20)]
        limit: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Look up usernames matching a term
    Autocomplete {
        term: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
