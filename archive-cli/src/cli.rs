use std::{io, process::ExitCode};

use anyhow::Context;
use archive_core::{
    ArchiveClient, Config, Field, QueryController, QueryInput, RequestState, client_from_config,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use log::debug;

use crate::output::{self, Format};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-archive",
    version,
    about = "Hourly temperature history from the Open-Meteo archive"
)]
pub struct Cli {
    /// Log requests and failure causes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the hourly temperature series for a location and date range.
    Fetch {
        /// Latitude in decimal degrees, e.g. 52.52.
        #[arg(long, allow_hyphen_values = true)]
        latitude: String,

        /// Longitude in decimal degrees, e.g. 13.41.
        #[arg(long, allow_hyphen_values = true)]
        longitude: String,

        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start_date: String,

        /// Last day, YYYY-MM-DD.
        #[arg(long)]
        end_date: String,

        /// Print the raw response as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for the query fields, fetch, and repeat on request.
    Interactive,

    /// Set the archive endpoint and time format. Prompts when no flag is given.
    Configure {
        /// Archive URL.
        #[arg(long)]
        endpoint: Option<String>,

        /// chrono format string for the time column, e.g. "%d.%m.%Y %H:%M".
        #[arg(long)]
        time_format: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Fetch { latitude, longitude, start_date, end_date, json } => {
                let config = load_config()?;
                let input = QueryInput { latitude, longitude, start_date, end_date };
                let mut controller =
                    QueryController::with_input(client_from_config(&config), input);

                let format = if json { Format::Json } else { Format::Table };
                run_cycle(&mut controller, &config, format).await?;

                if controller.view().error {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Interactive => {
                let config = load_config()?;
                let mut controller = QueryController::new(client_from_config(&config));

                loop {
                    for field in Field::all() {
                        let value = Text::new(label(*field))
                            .with_placeholder(placeholder(*field))
                            .with_initial_value(controller.input().get(*field))
                            .prompt()?;
                        controller.set_field(*field, value);
                    }

                    run_cycle(&mut controller, &config, Format::Table).await?;

                    let again = Confirm::new("Fetch another range?").with_default(true).prompt()?;
                    if !again {
                        break;
                    }
                }
            }
            Command::Configure { endpoint, time_format } => {
                // Unreadable files fall back to defaults and get overwritten.
                let mut config = Config::load_or_default();
                let interactive = endpoint.is_none() && time_format.is_none();

                let endpoint = match endpoint {
                    Some(e) => Some(e),
                    None if interactive => Some(
                        Text::new("Archive endpoint:").with_default(config.endpoint()).prompt()?,
                    ),
                    None => None,
                };
                let time_format = match time_format {
                    Some(f) => Some(f),
                    None if interactive => Some(
                        Text::new("Time format:").with_default(config.time_format()).prompt()?,
                    ),
                    None => None,
                };

                if let Some(endpoint) = endpoint {
                    config.set_endpoint(&endpoint)?;
                }
                if let Some(time_format) = time_format {
                    config.set_time_format(&time_format)?;
                }

                config.save()?;
                println!("Saved configuration to {}", Config::config_file_path()?.display());
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load()?;
    debug!("Using archive endpoint {}", config.endpoint());
    Ok(config)
}

/// One query cycle: show the spinner while the request is in flight, then
/// the final state.
async fn run_cycle<C: ArchiveClient>(
    controller: &mut QueryController<C>,
    config: &Config,
    format: Format,
) -> anyhow::Result<()> {
    if let Some(pending) = controller.begin() {
        render(controller.state(), &mut io::stderr(), config, format)?;
        let outcome = controller.fetch(&pending).await;
        controller.complete(pending, outcome);
    }

    render(controller.state(), &mut io::stdout(), config, format)
}

fn render<W: io::Write>(
    state: &RequestState,
    out: &mut W,
    config: &Config,
    format: Format,
) -> anyhow::Result<()> {
    output::render(out, state.view(), format, &Local, config.time_format())
        .context("Failed to write output")
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Latitude => "Latitude:",
        Field::Longitude => "Longitude:",
        Field::StartDate => "Start date:",
        Field::EndDate => "End date:",
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Latitude => "Enter Latitude",
        Field::Longitude => "Enter Longitude",
        Field::StartDate | Field::EndDate => "YYYY-MM-DD",
    }
}
