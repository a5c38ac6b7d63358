use clap::{Parser, Subcommand, ValueEnum};
use ferrous_shield_domain::{CliOverrides, HostResourceType, SubscriptionTier};
use tracing::info;

mod bootstrap;
mod commands;
mod di;
mod surface;

#[derive(Parser)]
#[command(name = "ferrous-shield")]
#[command(version)]
#[command(about = "Ferrous Shield - EasyList ad blocking for embedded web views")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Root directory for downloaded, bundled and compiled lists
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile every configured filter list into a rule list
    Compile {
        /// Ignore compiled flags and rebuild every list
        #[arg(long)]
        force: bool,
    },
    /// Download filter lists once the saved copies are older than the refresh interval
    Update {
        /// Download regardless of age
        #[arg(long)]
        force: bool,
    },
    /// Manage domains exempt from ad blocking
    Whitelist {
        #[command(subcommand)]
        action: WhitelistAction,
    },
    /// Switch ad blocking on or off, or show whether it is active
    Blocking {
        #[arg(value_enum)]
        state: BlockingState,
    },
    /// Show or set the cached subscription tier
    Tier {
        #[arg(value_enum)]
        tier: Option<TierArg>,
    },
    /// Evaluate a resource URL as loaded from a page
    Check {
        url: String,

        /// Page issuing the load; defaults to the resource URL itself
        #[arg(long)]
        page: Option<String>,

        #[arg(long = "type", value_enum, default_value = "raw")]
        resource_type: ResourceArg,
    },
    /// Set up rule lists and keep them fresh until interrupted
    Run,
}

#[derive(Subcommand)]
enum WhitelistAction {
    Add { domain: String },
    Remove { domain: String },
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum BlockingState {
    On,
    Off,
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum TierArg {
    Free,
    Premium,
}

impl From<TierArg> for SubscriptionTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Free => SubscriptionTier::Free,
            TierArg::Premium => SubscriptionTier::Premium,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceArg {
    Document,
    Image,
    Stylesheet,
    Script,
    Font,
    Raw,
    SvgDocument,
    Media,
    Popup,
}

impl From<ResourceArg> for HostResourceType {
    fn from(arg: ResourceArg) -> Self {
        match arg {
            ResourceArg::Document => HostResourceType::Document,
            ResourceArg::Image => HostResourceType::Image,
            ResourceArg::Stylesheet => HostResourceType::StyleSheet,
            ResourceArg::Script => HostResourceType::Script,
            ResourceArg::Font => HostResourceType::Font,
            ResourceArg::Raw => HostResourceType::Raw,
            ResourceArg::SvgDocument => HostResourceType::SvgDocument,
            ResourceArg::Media => HostResourceType::Media,
            ResourceArg::Popup => HostResourceType::Popup,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        data_directory: cli.data_dir.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous Shield v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool).await?;
    let services = di::Services::new(&config, &repos)?;
    let use_cases = di::UseCases::new(&config, &repos, &services);

    let app = commands::App {
        config: &config,
        repos: &repos,
        services: &services,
        use_cases: &use_cases,
    };

    match cli.command {
        Command::Compile { force } => app.compile(force).await,
        Command::Update { force } => app.update(force).await,
        Command::Whitelist { action } => match action {
            WhitelistAction::Add { domain } => app.whitelist_add(&domain).await,
            WhitelistAction::Remove { domain } => app.whitelist_remove(&domain).await,
            WhitelistAction::List => app.whitelist_list().await,
        },
        Command::Blocking { state } => match state {
            BlockingState::On => app.set_blocking(true).await,
            BlockingState::Off => app.set_blocking(false).await,
            BlockingState::Status => app.blocking_status().await,
        },
        Command::Tier { tier } => app.tier(tier.map(Into::into)).await,
        Command::Check {
            url,
            page,
            resource_type,
        } => {
            app.check(&url, page.as_deref(), resource_type.into())
                .await
        }
        Command::Run => app.run().await,
    }
}
