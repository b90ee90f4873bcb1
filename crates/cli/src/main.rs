use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use userdesk_auth::PermissionFilter;
use userdesk_client::{ClientConfig, UserService};
use userdesk_observability::LogFormat;

const ENV_LOG_FORMAT: &str = "USERDESK_LOG_FORMAT";

#[derive(Debug, Parser)]
#[command(name = "userdesk", version, about = "Command-line client for the user management backend")]
struct Cli {
    /// Instance name (`acme`) or full API URL; overrides USERDESK_INSTANCE.
    #[arg(long, global = true)]
    instance: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Credentials {
    #[arg(long, env = "USERDESK_USERNAME")]
    username: String,

    #[arg(long, env = "USERDESK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and print the profile and permission count.
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// List the time zones the backend accepts.
    TimeZones,
    /// Log in and list the permissions granted to the user.
    Permissions {
        #[command(flatten)]
        credentials: Credentials,

        /// Restrict the lookup to these permission ids (repeatable).
        #[arg(long = "id", value_name = "PERMISSION_ID")]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format = match std::env::var(ENV_LOG_FORMAT) {
        Ok(value) => value
            .parse::<LogFormat>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?,
        Err(_) => LogFormat::default(),
    };
    userdesk_observability::init(log_format);

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let service = UserService::new(config).context("failed to build HTTP client")?;
    if let Some(instance) = cli.instance {
        service.set_instance_url(instance).await;
    }

    match cli.command {
        Command::Login { credentials } => login(&service, &credentials).await,
        Command::TimeZones => time_zones(&service).await,
        Command::Permissions { credentials, ids } => {
            let filter = if ids.is_empty() {
                PermissionFilter::All
            } else {
                PermissionFilter::only(ids)
            };
            permissions(&service, &credentials, &filter).await
        }
    }
}

async fn login(service: &UserService, credentials: &Credentials) -> Result<()> {
    let outcome = service
        .login_and_load(&credentials.username, &credentials.password, &PermissionFilter::All)
        .await
        .context("login failed")?;

    let profile = &outcome.profile;
    println!("user:        {}", profile.user_login_id);
    if let Some(party_id) = &profile.party_id {
        println!("party:       {party_id}");
    }
    if let Some(name) = &profile.party_name {
        println!("name:        {name}");
    }
    if let Some(tz) = &profile.user_time_zone {
        println!("time zone:   {tz}");
    }
    println!("permissions: {}", outcome.permissions.permissions.len());

    if !outcome.permissions.is_complete() {
        tracing::warn!(
            failed_pages = outcome.permissions.failed_pages.len(),
            skipped_pages = outcome.permissions.skipped_pages,
            missing = outcome.permissions.missing,
            "permission list is incomplete"
        );
    }

    service.logout().await;
    Ok(())
}

async fn time_zones(service: &UserService) -> Result<()> {
    let zones = service
        .get_available_time_zones()
        .await
        .context("failed to fetch time zones")?;
    for zone in zones {
        println!("{:<32} {}", zone.id, zone.label);
    }
    Ok(())
}

async fn permissions(
    service: &UserService,
    credentials: &Credentials,
    filter: &PermissionFilter,
) -> Result<()> {
    let outcome = service
        .login_and_load(&credentials.username, &credentials.password, filter)
        .await
        .context("login failed")?;
    service.logout().await;

    let permissions = outcome
        .permissions
        .require_complete()
        .context("permission list is incomplete")?;
    for permission in permissions {
        println!("{permission}");
    }
    Ok(())
}
