use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::{error, warn};
use slotplan::cli::{file_io, print_schedule, resolve_data_file};
use slotplan::cli_error::CliError;
use slotplan::data_store::memory::MemoryStore;
use std::path::PathBuf;

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: CliArgs) -> Result<(), CliError> {
    let store = MemoryStore::new();
    let data_file = resolve_data_file(args.global_opts.data)?;
    file_io::load_snapshot_from_file(&data_file, &store)?;

    match args.command {
        Command::Rooms => {
            println!("{}", print_schedule::room_list_table(&store)?);
        }
        Command::Day { room, date, json } => {
            let date = date.unwrap_or_else(today);
            if json {
                file_io::write_day_schedule(&store, &room, date, std::io::stdout().lock())?;
                println!();
            } else {
                println!("{}", print_schedule::day_schedule_table(&store, &room, date)?);
            }
        }
        Command::Reservations { owner, date } => {
            let today = date.unwrap_or_else(today);
            println!(
                "{}",
                print_schedule::owner_reservations_table(&store, &owner, today)?
            );
        }
        Command::Week { room, date } => {
            let date = date.unwrap_or_else(today);
            println!(
                "{}",
                print_schedule::week_schedule_table(&store, &room, date)?
            );
        }
    }
    Ok(())
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Room availability schedules from a snapshot of reservations and class timetables
#[derive(Debug, Parser)]
#[clap(name = "slotplan", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all rooms of the snapshot
    Rooms,
    /// Show the occupation of a room's booking slots on a single day
    Day {
        /// The id of the room
        room: String,
        /// The date to show (YYYY-MM-DD). Defaults to today.
        #[clap(long)]
        date: Option<chrono::NaiveDate>,
        /// Print the schedule as JSON document instead of a table
        #[clap(long)]
        json: bool,
    },
    /// List the reservations of a user, grouped into upcoming, past and cancelled ones
    Reservations {
        /// The name of the user who made the reservations
        #[clap(long)]
        owner: String,
        /// The date to treat as today (YYYY-MM-DD). Defaults to the actual date.
        #[clap(long)]
        date: Option<chrono::NaiveDate>,
    },
    /// Show the occupation of a room's booking slots during a whole week (Monday to Sunday)
    Week {
        /// The id of the room
        room: String,
        /// Any date within the week to show (YYYY-MM-DD). Defaults to today.
        #[clap(long)]
        date: Option<chrono::NaiveDate>,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// The JSON snapshot file with rooms, reservations and timetable entries. Defaults to the
    /// value of the SLOTPLAN_DATA_FILE environment variable.
    #[clap(long, global = true)]
    data: Option<PathBuf>,
}
