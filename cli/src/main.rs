
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use roombook::config::ConfigError;
use roombook::net::ApiError;
use roombook::net::transport::ReqwestTransport;
use roombook::net::types::{
    CreateBooking, ListQuery, LoginRequest, RecordId, RegisterRequest, RoomPayload, SortOrder, UpdateBookingStatus,
    UpdateRoom,
};
use roombook::util::token_store::FileTokenStore;
use roombook::{ApiClient, ApiConfig, SessionContext};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

type Session = SessionContext<ReqwestTransport, FileTokenStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Action(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "roombook-cli", about = "Meeting-room booking API CLI")]
struct Cli {
    #[arg(long, env = "ROOMBOOK_API_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "ROOMBOOK_TOKEN_FILE", default_value = ".roombook-token")]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Auth(AuthCommand),
    Booking(BookingCommand),
    Room(RoomCommand),
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROOMBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROOMBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Profile,
    /// Validate the stored token; drops it if the server rejects it.
    Check,
    Logout,
}

#[derive(Args, Debug)]
struct BookingCommand {
    #[command(subcommand)]
    command: BookingSubcommand,
}

#[derive(Subcommand, Debug)]
enum BookingSubcommand {
    Create {
        #[arg(long, value_parser = parse_record_id)]
        room_id: RecordId,
        #[arg(long)]
        start_at: String,
        #[arg(long)]
        end_at: String,
    },
    Dates,
    AvailableRooms {
        #[arg(long)]
        start_at: String,
        #[arg(long)]
        end_at: String,
    },
    All(ListArgs),
    Mine(ListArgs),
    UpdateStatus {
        #[arg(value_parser = parse_record_id)]
        booking_id: RecordId,
        #[arg(long)]
        status: String,
    },
    Cancel {
        #[arg(value_parser = parse_record_id)]
        booking_id: RecordId,
    },
}

#[derive(Args, Debug)]
struct RoomCommand {
    #[command(subcommand)]
    command: RoomSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoomSubcommand {
    Create(RoomArgs),
    List(ListArgs),
    Read {
        #[arg(value_parser = parse_record_id)]
        room_id: RecordId,
    },
    Update {
        #[arg(value_parser = parse_record_id)]
        room_id: RecordId,
        #[command(flatten)]
        room: RoomArgs,
    },
    Delete {
        #[arg(value_parser = parse_record_id)]
        room_id: RecordId,
    },
}

#[derive(Args, Debug)]
struct RoomArgs {
    #[arg(long)]
    name: String,
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    available: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    limit: u32,
    #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
    order: OrderArg,
    #[arg(long, default_value = "id")]
    order_by: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<&ListArgs> for ListQuery {
    fn from(args: &ListArgs) -> Self {
        let order = match args.order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        };
        ListQuery::default()
            .page(args.page)
            .limit(args.limit)
            .order(order)
            .order_by(args.order_by.clone())
    }
}

impl From<RoomArgs> for RoomPayload {
    fn from(args: RoomArgs) -> Self {
        RoomPayload { room_name: args.name, available: args.available }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = build_session(&cli)?;

    match cli.command {
        Command::Auth(auth) => run_auth(&session, auth).await,
        Command::Booking(booking) => run_booking(&session, booking).await,
        Command::Room(room) => run_room(&session, room).await,
    }
}

fn build_session(cli: &Cli) -> Result<Session, CliError> {
    let config = ApiConfig::new(&cli.base_url)?;
    let tokens = FileTokenStore::new(&cli.token_file);
    let api = ApiClient::new(config, ReqwestTransport::new(), tokens);
    Ok(SessionContext::new(api))
}

async fn run_auth(session: &Session, auth: AuthCommand) -> Result<(), CliError> {
    match auth.command {
        AuthSubcommand::Register { first_name, last_name, user_name, email, password } => {
            let request = RegisterRequest { first_name, last_name, user_name, email, password };
            let user = session.register(&request).await.map_err(CliError::Action)?;
            print_json(&user)
        }
        AuthSubcommand::Login { email, password } => {
            session
                .login(&LoginRequest { email, password })
                .await
                .map_err(CliError::Action)?;
            print_json(&session.current_user())
        }
        AuthSubcommand::Profile => print_json(&session.api().get_profile().await?),
        AuthSubcommand::Check => {
            let valid = session.check_auth().await;
            println!("{valid}");
            Ok(())
        }
        AuthSubcommand::Logout => {
            session.logout();
            println!("logged out; cleared {}", session.api().tokens().path().display());
            Ok(())
        }
    }
}

async fn run_booking(session: &Session, booking: BookingCommand) -> Result<(), CliError> {
    let api = session.api();
    match booking.command {
        BookingSubcommand::Create { room_id, start_at, end_at } => {
            let request = CreateBooking { room_id, start_at, end_at };
            print_json(&api.create_booking(&request).await?)
        }
        BookingSubcommand::Dates => print_json(&api.get_available_dates().await?),
        BookingSubcommand::AvailableRooms { start_at, end_at } => {
            print_json(&api.get_available_rooms(&start_at, &end_at).await?)
        }
        BookingSubcommand::All(args) => print_json(&api.get_all_bookings(&ListQuery::from(&args)).await?),
        BookingSubcommand::Mine(args) => print_json(&api.get_owned_bookings(&ListQuery::from(&args)).await?),
        BookingSubcommand::UpdateStatus { booking_id, status } => {
            let request = UpdateBookingStatus { booking_id, status };
            print_json(&api.update_booking_status(&request).await?)
        }
        BookingSubcommand::Cancel { booking_id } => print_json(&api.cancel_booking(&booking_id).await?),
    }
}

async fn run_room(session: &Session, room: RoomCommand) -> Result<(), CliError> {
    let api = session.api();
    match room.command {
        RoomSubcommand::Create(args) => print_json(&api.create_room(&RoomPayload::from(args)).await?),
        RoomSubcommand::List(args) => print_json(&api.get_all_rooms(&ListQuery::from(&args)).await?),
        RoomSubcommand::Read { room_id } => print_json(&api.get_room_by_id(&room_id).await?),
        RoomSubcommand::Update { room_id, room } => {
            let request = UpdateRoom { room_id, room: RoomPayload::from(room) };
            print_json(&api.update_room(&request).await?)
        }
        RoomSubcommand::Delete { room_id } => print_json(&api.delete_room(&room_id).await?),
    }
}

fn parse_record_id(raw: &str) -> Result<RecordId, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("id must not be empty".to_owned());
    }
    Ok(trimmed
        .parse::<i64>()
        .map_or_else(|_| RecordId::from(trimmed), RecordId::Int))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let value: Value = serde_json::to_value(value)?;
    let rendered = serde_json::to_string_pretty(&value)?;
    println!("{rendered}");
    Ok(())
}
