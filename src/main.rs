use clap::{Parser, Subcommand, ValueEnum};
use goldshop_console::net::types::RegisterRequest;
use goldshop_console::resources::{self, ActiveFilter, dashboard, parties, users, work_types, workers};
use goldshop_console::{ApiError, ClientConfig, ConfigError, SessionController};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "goldshop", about = "Gold shop admin backend CLI")]
struct Cli {
    /// Backend origin; `/api` is appended.
    #[arg(long, env = "GOLDSHOP_BACKEND_URL")]
    base_url: Option<String>,

    #[arg(long, env = "GOLDSHOP_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "GOLDSHOP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the resolved session.
    Whoami,
    /// Check permissions for the signed-in user.
    Can {
        #[arg(required = true)]
        permissions: Vec<String>,
        /// Require every permission instead of any one.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Create a new account. Does not change the session.
    Register {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// List staff accounts, or set one account's password.
    Users {
        /// Account id whose password to change.
        #[arg(long, requires = "new_password")]
        reset: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
    },
    Parties {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type", value_enum)]
        party_type: Option<PartyTypeArg>,
    },
    WorkTypes {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
    },
    Workers {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
    },
    Dashboard,
    /// Raw call against any `/api` path.
    Api {
        method: String,
        path: String,
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PartyTypeArg {
    Customer,
    Vendor,
    Worker,
}

impl From<PartyTypeArg> for parties::PartyType {
    fn from(arg: PartyTypeArg) -> Self {
        match arg {
            PartyTypeArg::Customer => Self::Customer,
            PartyTypeArg::Vendor => Self::Vendor,
            PartyTypeArg::Worker => Self::Worker,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusArg {
    All,
    Active,
    Inactive,
}

impl From<StatusArg> for ActiveFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => Self::All,
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env_with_backend_url(cli.base_url.as_deref())?;

    let session = SessionController::start(&config).await?;
    let signed_in_here = sign_in(&session, cli.username.as_deref(), cli.password.as_deref()).await?;

    let result = run(&session, cli.command).await;

    if signed_in_here {
        session.logout().await;
    }
    result
}

/// Log in when credentials are given and the cookie did not already restore
/// a session. Returns whether this invocation created the session.
async fn sign_in(session: &SessionController, username: Option<&str>, password: Option<&str>) -> Result<bool, CliError> {
    match (username, password) {
        (Some(username), Some(password)) if !session.is_authenticated() => {
            session.login(username, password).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

async fn run(session: &SessionController, command: Command) -> Result<(), CliError> {
    let api = session.api();
    match command {
        Command::Whoami => print_json(&json!({
            "authenticated": session.is_authenticated(),
            "user": session.current_user(),
            "csrf_token_present": session.csrf_token().is_some(),
        })),
        Command::Can { permissions, all } => {
            let granted = if all {
                session.has_all_permissions(permissions.as_slice())
            } else {
                session.has_any_permission(permissions.as_slice())
            };
            print_json(&json!({ "granted": granted, "permissions": permissions, "all": all }))
        }
        Command::Register { username, password, email, full_name, role } => {
            let profile = RegisterRequest { username, password, email, full_name, role };
            session.register(&profile).await?;
            print_json(&json!({ "registered": profile.username }))
        }
        Command::Users { reset: Some(id), new_password: Some(password) } => {
            users::change_password(api, &id, &password).await?;
            print_json(&json!({ "password_changed": id }))
        }
        Command::Users { .. } => print_json(&users::list_users(api).await?),
        Command::Parties { search, party_type } => {
            let filter = party_type.map_or(parties::PartyFilter::All, |t| parties::PartyFilter::Only(t.into()));
            let all = parties::list_parties(api).await?;
            print_json(&parties::filter_parties(&all, &search, filter))
        }
        Command::WorkTypes { page, page_size, search, status } => {
            let listed = work_types::list_work_types(api, page, page_size).await?;
            let items = work_types::filter_work_types(&listed.items, &search, status.into());
            print_json(&json!({ "items": items, "pagination": listed.pagination }))
        }
        Command::Workers { search, status } => {
            let all = workers::list_workers(api).await?;
            print_json(&workers::filter_workers(&all, &search, status.into()))
        }
        Command::Dashboard => print_json(&dashboard::load_dashboard(api).await),
        Command::Api { method, path, data } => {
            let method =
                Method::from_bytes(method.to_uppercase().as_bytes()).map_err(|_| CliError::InvalidMethod(method))?;
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let path = if path.starts_with('/') { path } else { format!("/{path}") };
            let value = resources::send_value(api, method, &path, body.as_ref()).await?;
            print_json(&value)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
