//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use leap_domain::OutputFormat;
use std::path::PathBuf;

/// Output format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Colored, sectioned console output
    Pretty,
    /// The structured result as JSON
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Pretty => OutputFormat::Pretty,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for leap-studio
#[derive(Parser, Debug)]
#[command(name = "leap")]
#[command(author, version, about = "LEAP Studio - AI tools for student founders")]
#[command(long_about = r#"
LEAP Studio turns a short description of your idea or startup into structured
plans: project blueprints, pitch decks, learning paths, content ideas,
compliance packs, growth dashboards and more. Answers come from Gemini and are
validated before they are shown.

Configuration files are loaded from (in priority order):
1. LEAP_* environment variables (e.g. LEAP_MODEL__NAME)
2. --config <path>     Explicit config file
3. ./leap.toml         Project-level config
4. ~/.config/leap-studio/config.toml   Global config

Example:
  leap plan "An app that matches students with research labs"
  leap reels --name Sproutly --domain EdTech --stage MVP --platform instagram
  leap community signup --username asha --email asha@example.com --full-name "Asha Rao"
  leap solve "Users sign up but never come back"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides [output].format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn a raw idea into an MVP blueprint
    Plan {
        /// The idea, in your own words
        idea: String,
    },

    /// Pitch deck, names and elevator pitch for a startup profile
    Pitch(ProfileArgs),

    /// A week-by-week roadmap for building an idea
    Learn {
        idea: String,

        /// Domain of the idea (e.g. FinTech)
        #[arg(long)]
        domain: String,
    },

    /// Short-form video ideas per platform
    Reels(ReelsArgs),

    /// Registration guide, agreements and tax checklist
    Compliance(ComplianceArgs),

    /// Explain a startup news headline
    News {
        headline: String,

        /// Source article link
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Growth experiments and alerts from the startup's metrics
    Growth(ProfileArgs),

    /// Score an interview transcript
    Examine(ExamineArgs),

    /// Weekly founder check-in and burnout reflection
    Mirror(MirrorArgs),

    /// Readiness score, deck review and investor outreach
    Fundraise(FundraiseArgs),

    /// Diagnose a startup problem for the signed-in founder
    Solve {
        problem: String,

        /// Do not store the session in the founder's history
        #[arg(long)]
        no_save: bool,
    },

    /// Pull the JSON value out of raw model text
    Extract(ExtractArgs),

    /// Profiles, posts and messages
    #[command(subcommand)]
    Community(CommunityCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Selects whose startup profile a feature runs on
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Username to read the startup profile from (default: signed-in user)
    #[arg(long, value_name = "USERNAME")]
    pub user: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReelsArgs {
    /// Startup name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub domain: String,

    /// Stage (Idea, MVP, Early Traction, Scaling)
    #[arg(long, default_value = "Idea")]
    pub stage: String,

    /// Target platform; repeat for several (instagram, youtube, linkedin, ...)
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub platforms: Vec<String>,

    #[arg(long, default_value = "English")]
    pub language: String,
}

#[derive(Args, Debug, Clone)]
pub struct ComplianceArgs {
    #[arg(long)]
    pub name: String,

    /// Number of founders
    #[arg(long, default_value_t = 1)]
    pub founders: u32,

    /// Business type (e.g. SaaS, Marketplace, D2C)
    #[arg(long)]
    pub business_type: String,

    /// Who pays (e.g. B2B, B2C)
    #[arg(long)]
    pub customers: String,

    /// Entity to register (e.g. Private Limited, LLP)
    #[arg(long, default_value = "Private Limited Company")]
    pub registration: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExamineArgs {
    /// Transcript file, one `Speaker: text` line per turn ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub transcript: PathBuf,

    /// Snapshot image sent alongside the transcript; repeatable
    #[arg(long = "snapshot", value_name = "IMAGE")]
    pub snapshots: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct MirrorArgs {
    /// What went wrong this week
    #[arg(long)]
    pub went_wrong: String,

    /// The biggest blocker right now
    #[arg(long)]
    pub blocker: String,

    /// The system or habit to fix
    #[arg(long)]
    pub system: String,

    /// Do not store the check-in in the founder's log
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FundraiseArgs {
    /// Current deck outline, as text
    #[arg(long)]
    pub deck: String,

    #[arg(long, default_value = "Pre-Seed")]
    pub stage: String,

    #[arg(long)]
    pub sector: String,

    /// Monthly or annual recurring revenue
    #[arg(long, default_value_t = 0.0)]
    pub mrr_arr: f64,

    /// DAU/MAU ratio
    #[arg(long, default_value_t = 0.0)]
    pub dau_mau: f64,

    /// Customer acquisition cost
    #[arg(long, default_value_t = 0.0)]
    pub cac: f64,

    /// Customer lifetime value
    #[arg(long, default_value_t = 0.0)]
    pub ltv: f64,

    /// Retention, percent
    #[arg(long, default_value_t = 0.0)]
    pub retention: f64,

    /// Month-over-month growth, percent
    #[arg(long, default_value_t = 0.0)]
    pub growth_mom: f64,

    /// Free-form traction summary
    #[arg(long, default_value = "")]
    pub traction: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// File holding the model text (default: stdin)
    pub file: Option<PathBuf>,

    /// Only accept a bare value or a fenced block; no bracket scanning
    #[arg(long)]
    pub strict: bool,

    /// Classify the value as this feature's answer (e.g. pitch, reels)
    #[arg(long = "as", value_name = "FEATURE")]
    pub feature: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CommunityCommand {
    /// Create an account and sign in
    Signup(SignupArgs),

    /// Sign in as an existing user
    Login { username: String },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List everyone in the community
    Users,

    /// Show a profile (default: signed-in user)
    Profile { username: Option<String> },

    /// Update the signed-in user's profile
    Update(UpdateArgs),

    Follow { username: String },

    Unfollow { username: String },

    /// Publish a post
    Post { content: String },

    /// Like or unlike a post
    Like { post_id: String },

    Comment { post_id: String, content: String },

    /// Newest posts first
    Feed {
        /// Show at most this many posts
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Send a direct message
    Message { username: String, text: String },

    /// Show the conversation with another user
    Chat { username: String },

    /// Past mirror check-ins of the signed-in user
    Logs,

    /// Past problem-solver sessions of the signed-in user
    History,
}

#[derive(Args, Debug, Clone)]
pub struct SignupArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub full_name: String,

    #[arg(long, default_value = "Undergraduate")]
    pub education_level: String,

    #[arg(long, default_value = "")]
    pub institution: String,

    #[arg(long, default_value = "")]
    pub degree: String,

    #[arg(long, default_value = "")]
    pub graduation_year: String,

    /// Comma-separated skills
    #[arg(long, default_value = "")]
    pub skills: String,

    /// Comma-separated interests
    #[arg(long, default_value = "")]
    pub interests: String,

    #[arg(long, default_value = "Student")]
    pub role: String,

    #[arg(long, default_value = "")]
    pub location: String,

    #[command(flatten)]
    pub startup: StartupArgs,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    #[arg(long)]
    pub avatar_url: Option<String>,

    #[arg(long)]
    pub institution: Option<String>,

    #[arg(long)]
    pub degree: Option<String>,

    #[arg(long)]
    pub graduation_year: Option<String>,

    #[arg(long)]
    pub skills: Option<String>,

    #[arg(long)]
    pub interests: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[command(flatten)]
    pub startup: StartupArgs,
}

/// Startup profile fields; all must be given together with `--startup-name`
#[derive(Args, Debug, Clone, Default)]
pub struct StartupArgs {
    #[arg(long)]
    pub startup_name: Option<String>,

    #[arg(long, requires = "startup_name")]
    pub one_liner: Option<String>,

    #[arg(long = "startup-domain", requires = "startup_name")]
    pub startup_domain: Option<String>,

    /// Product type (e.g. Web App, Mobile App)
    #[arg(long, requires = "startup_name")]
    pub product_type: Option<String>,

    #[arg(long, requires = "startup_name")]
    pub target_audience: Option<String>,

    #[arg(long = "startup-stage", requires = "startup_name")]
    pub startup_stage: Option<String>,

    #[arg(long, requires = "startup_name")]
    pub team: Option<String>,

    #[arg(long, requires = "startup_name")]
    pub has_tech_team: bool,

    #[arg(long, requires = "startup_name")]
    pub website: Option<String>,

    #[arg(long, requires = "startup_name")]
    pub weekly_active_users: Option<u64>,

    #[arg(long, requires = "startup_name")]
    pub monthly_active_users: Option<u64>,

    #[arg(long, requires = "startup_name")]
    pub total_users: Option<u64>,

    #[arg(long, requires = "startup_name")]
    pub monthly_revenue: Option<f64>,

    #[arg(long, requires = "startup_name")]
    pub engagement_rate: Option<f64>,

    #[arg(long, requires = "startup_name")]
    pub user_acquisition: Option<u64>,

    #[arg(long, requires = "startup_name")]
    pub churn_rate: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// List the config files consulted, highest priority first
    Sources,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reels_with_platforms() {
        let cli = Cli::parse_from([
            "leap", "reels", "--name", "Sproutly", "--domain", "EdTech", "--platform",
            "instagram", "--platform", "youtube", "-o", "json",
        ]);
        assert_eq!(cli.output, Some(OutputFormatArg::Json));
        match cli.command {
            Command::Reels(args) => {
                assert_eq!(args.platforms, vec!["instagram", "youtube"]);
                assert_eq!(args.language, "English");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_community_signup_with_startup() {
        let cli = Cli::parse_from([
            "leap", "community", "signup", "--username", "asha", "--email", "a@x.io",
            "--full-name", "Asha Rao", "--startup-name", "Sproutly", "--churn-rate", "4.5",
        ]);
        match cli.command {
            Command::Community(CommunityCommand::Signup(args)) => {
                assert_eq!(args.username, "asha");
                assert_eq!(args.startup.startup_name.as_deref(), Some("Sproutly"));
                assert_eq!(args.startup.churn_rate, Some(4.5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_startup_fields_require_name() {
        let result = Cli::try_parse_from([
            "leap", "community", "update", "--one-liner", "Plants, but smarter",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_as_feature() {
        let cli = Cli::parse_from(["leap", "extract", "answer.txt", "--strict", "--as", "pitch"]);
        match cli.command {
            Command::Extract(args) => {
                assert!(args.strict);
                assert_eq!(args.feature.as_deref(), Some("pitch"));
                assert_eq!(args.file, Some(PathBuf::from("answer.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
