mod app;
mod app_state;
mod i18n;
mod router;
mod tui;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use flightontime_sdk::{
    match_airports, match_carriers, ClientConfig, Field, FileSessionStore, FlightOnTimeApi,
    FlightOnTimeClient, QueryOrchestrator, RequestState, SdkError, SessionGate,
};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::app_state::AppController;
use crate::i18n::{Locale, T};
use crate::tui::EventHandler;

const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "flightontime")]
#[command(about = "FlightOnTime flight delay prediction client")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides FLIGHTONTIME_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// HTTP timeout in seconds (overrides FLIGHTONTIME_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Language of user-facing messages
    #[arg(long, global = true, value_enum, default_value_t = Locale::Pt)]
    pub lang: Locale,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the delay risk of one flight
    Predict(PredictArgs),
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Suggest airports matching a query
    Airports { query: String },
    /// Suggest carriers matching a query
    Carriers { query: String },
    /// Open the interactive search form
    Tui,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Airline name (ex: LATAM)
    #[arg(short, long)]
    pub carrier: String,

    /// Origin airport IATA code (ex: GRU)
    #[arg(short, long)]
    pub origin: String,

    /// Destination airport IATA code (ex: GIG)
    #[arg(short, long)]
    pub destination: String,

    /// Local departure time (ex: 2025-03-14T18:30)
    #[arg(long)]
    pub departure: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Tui))?;

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = FlightOnTimeClient::new(&config)?;
    let t = i18n::t(cli.lang);

    match cli.command {
        Commands::Predict(args) => predict(&client, &config, args, &t).await,
        Commands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password(&t)?,
            };
            let token = client.login(&email, &password).await.map_err(|e| match e {
                SdkError::Auth(_) => anyhow!(t.invalid_credentials),
                other => anyhow::Error::from(other).context(t.login_error),
            })?;
            session_gate()?.set_session(&token)?;
            println!("{}", t.logged_in);
            Ok(())
        }
        Commands::Logout => {
            session_gate()?.clear_session()?;
            println!("{}", t.logged_out);
            Ok(())
        }
        Commands::Status => {
            let gate = session_gate()?;
            println!(
                "{} ({})",
                if gate.has_session() { t.session_active } else { t.no_session },
                gate.store().path().display()
            );
            Ok(())
        }
        Commands::Airports { query } => {
            let airports = client.airports().await?;
            for airport in match_airports(&query, &airports) {
                println!("{}  {}", airport.iata_code, airport.full_name);
            }
            Ok(())
        }
        Commands::Carriers { query } => {
            let carriers = client.carriers().await?;
            for carrier in match_carriers(&query, &carriers) {
                println!("{}", carrier.name);
            }
            Ok(())
        }
        Commands::Tui => run_tui(client, &config, cli.lang).await,
    }
}

/// One-shot CLI commands log to stderr at `warn`; the TUI logs to a file so
/// the terminal is left alone.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let default = if to_file { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if to_file {
        let dir = dirs::config_dir()
            .context("could not determine config directory")?
            .join("flightontime");
        std::fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("flightontime.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn session_gate() -> anyhow::Result<SessionGate<FileSessionStore>> {
    Ok(SessionGate::new(FileSessionStore::default_location()?))
}

fn read_password(t: &T) -> anyhow::Result<String> {
    eprint!("{}: ", t.password);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn predict(
    client: &FlightOnTimeClient,
    config: &ClientConfig,
    args: PredictArgs,
    t: &T,
) -> anyhow::Result<()> {
    let mut query = QueryOrchestrator::new(config.risk_policy, config.departure_zone);
    query.set_field(Field::Carrier, &args.carrier);
    query.set_field(Field::Origin, &args.origin);
    query.set_field(Field::Destination, &args.destination);
    query.set_field(Field::Departure, &args.departure);

    if query.submit(client).await != RequestState::Succeeded {
        let message = query.error().map_or(t.request_failed, |e| t.query_error(e));
        bail!("{message}");
    }
    let result = query.result().context("prediction succeeded without a result")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", ui::card::to_text(result, t));
    }
    Ok(())
}

async fn run_tui(client: FlightOnTimeClient, config: &ClientConfig, locale: Locale) -> anyhow::Result<()> {
    let gate = session_gate()?;
    let mut events = EventHandler::new(TICK_RATE);
    let mut app = App::new(client, gate, config, locale, events.sender());
    app.start();

    let mut terminal = tui::init()?;
    let outcome = async {
        while !app.should_quit() {
            terminal.draw(|f| app.render(f))?;
            match events.next().await {
                Some(action) => app.update(action),
                None => break,
            }
        }
        anyhow::Ok(())
    }
    .await;
    tui::restore()?;
    outcome
}
