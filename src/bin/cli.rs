//! rosapi CLI Client
//!
//! Command-line interface for talking to a device's API service.
//! Results are printed as JSON on stdout; logs go to stderr.

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use rosapi::{Config, LoginMethod, Record, RosError, Session};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

/// rosapi CLI
#[derive(Parser, Debug)]
#[command(name = "rosapi-cli")]
#[command(about = "Query a RouterOS device over the binary API")]
#[command(version)]
struct Args {
    /// JSON device profile ({"ip", "port", "username", "password"});
    /// replaces --host, --port, --user and --password
    #[arg(long)]
    profile: Option<String>,

    /// Device address
    #[arg(long, default_value = "192.168.88.1")]
    host: String,

    /// API port
    #[arg(short, long, default_value = "8728")]
    port: u16,

    /// Login user name
    #[arg(short, long, default_value = "admin")]
    user: String,

    /// Login password
    #[arg(long, env = "ROSAPI_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Login handshake: auto, plain or challenge
    #[arg(long, default_value = "auto")]
    login_method: LoginMethod,

    /// Connect timeout in milliseconds
    #[arg(long, default_value = "3000")]
    connect_timeout_ms: u64,

    /// Read/write timeout in milliseconds
    #[arg(long, default_value = "3000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command and print the returned rows
    Run {
        /// Command path, e.g. /interface/print
        path: String,

        /// Parameters as key=value (prefix ? for queries)
        params: Vec<String>,
    },

    /// List device users, optionally filtered by name
    Users {
        /// Only show this user
        #[arg(long)]
        target_user: Option<String>,
    },

    /// Show the account used to log in
    LoginUser,

    /// Connect and log in only, reporting the handshake used
    Probe,
}

fn main() -> ExitCode {
    // Initialize tracing/logging (stderr, so stdout stays valid JSON)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rosapi=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("rosapi CLI v{}", rosapi::VERSION);

    match run(args) {
        Ok(output) => {
            println!("{}", pretty(&output));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", pretty(&json!({ "status": false, "error": e.to_string() })));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<serde_json::Value, RosError> {
    let config = build_config(&args)?;
    let started = Instant::now();
    let mut session = Session::open(config)?;

    let output = match &args.command {
        Commands::Run { path, params } => {
            let params = parse_params(params)?;
            let records = session.execute(path, params)?;
            serde_json::to_value(records)?
        }
        Commands::Users { target_user } => {
            let filter: Vec<(&str, &str)> = target_user
                .as_deref()
                .map(|name| vec![("?name", name)])
                .unwrap_or_default();
            let users = session.execute("/user/print", filter)?;
            json!({ "status": true, "data": users })
        }
        Commands::LoginUser => {
            let username = session.config().username.clone();
            let users = session.execute("/user/print", [("?name", username.as_str())])?;
            let user = users.into_iter().next().ok_or_else(|| {
                RosError::Config(format!("login user {} not found on device", username))
            })?;
            json!({ "status": true, "login_user": login_user_summary(&user) })
        }
        Commands::Probe => json!({
            "status": true,
            "address": session.config().address(),
            "method": format!("{:?}", session.auth_method()),
            "elapsed_ms": started.elapsed().as_millis() as u64,
        }),
    };

    session.disconnect();
    Ok(output)
}

fn build_config(args: &Args) -> Result<Config, RosError> {
    let base = match &args.profile {
        Some(path) => Config::from_json_file(path)?,
        None => Config::builder()
            .host(&args.host)
            .port(args.port)
            .username(&args.user)
            .password(&args.password)
            .build(),
    };

    Ok(Config {
        login_method: args.login_method,
        connect_timeout_ms: args.connect_timeout_ms,
        read_timeout_ms: args.timeout_ms,
        write_timeout_ms: args.timeout_ms,
        ..base
    })
}

/// Split `key=value` arguments on the first `=` past a leading `=`, so
/// `=name=x` keeps its attribute prefix
fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>, RosError> {
    raw.iter()
        .map(|arg| {
            let skip = usize::from(arg.starts_with('='));
            arg[skip..]
                .split_once('=')
                .map(|(k, v)| (format!("{}{}", &arg[..skip], k), v.to_string()))
                .ok_or_else(|| RosError::Config(format!("expected key=value, got {}", arg)))
        })
        .collect()
}

fn login_user_summary(user: &Record) -> serde_json::Value {
    let field = |key: &str| user.get(key).unwrap_or_default().to_string();
    json!({
        "name": field("name"),
        "group": field("group"),
        "disabled": field("disabled"),
        "expired": field("expired"),
    })
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
