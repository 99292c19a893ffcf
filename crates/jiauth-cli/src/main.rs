//! JIAuth CLI - manual driver for a JIAuth service.
//!
//! This is the entry point for the `jiauth` binary.

mod smoke;

use clap::{Parser, Subcommand};
use serde_json::Value;

use jiauth_client::{ApiResponse, AuthClient, ClientConfig, IdentityApi, Ticket, UserId};

/// JIAuth CLI - call a JIAuth service as a registered application.
#[derive(Parser, Debug)]
#[command(name = "jiauth")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the JIAuth service.
    #[arg(long, env = "JIAUTH_BASE_URL", default_value = "http://localhost:9000")]
    base_url: String,

    /// Client id of the calling application.
    #[arg(long, env = "JIAUTH_CLIENT_ID")]
    client_id: String,

    /// Client secret of the calling application.
    #[arg(long, env = "JIAUTH_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a ticket.
    Ticket {
        /// Ticket to look up.
        ticket: Ticket,
    },
    /// Fetch a user profile.
    User {
        /// User ID.
        user_id: UserId,
    },
    /// Add a user to a group.
    AddMember {
        /// Group name.
        group: String,
        /// User ID.
        user_id: UserId,
    },
    /// Remove a user from a group.
    RemoveMember {
        /// Group name.
        group: String,
        /// User ID.
        user_id: UserId,
    },
    /// Get a ticket for logging into another application.
    Login {
        /// Client id of the other application.
        client_id: String,
    },
    /// Run the smoke test sequence against a seeded service.
    Smoke,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_env_filter("jiauth_client=debug,jiauth_cli=debug,warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = ClientConfig::new(&args.base_url, &args.client_id, &args.client_secret);
    tracing::debug!(?config, "Connecting to JIAuth");
    let client = AuthClient::new(config)?;

    match args.command {
        Command::Ticket { ticket } => print_json(&client.get_app_ticket_raw(&ticket).await?)?,
        Command::User { user_id } => print_json(&client.get_user_info_raw(user_id).await?)?,
        Command::AddMember { group, user_id } => {
            print_membership(&client.add_user_to_group(&group, user_id).await?);
        }
        Command::RemoveMember { group, user_id } => {
            print_membership(&client.remove_user_from_group(&group, user_id).await?);
        }
        Command::Login { client_id } => match client.login(&client_id).await? {
            ApiResponse::Success(ticket) => println!("true {ticket}"),
            ApiResponse::Failure(err) => println!("false {}", err.error_code),
        },
        Command::Smoke => {
            let report = smoke::run(&client, &args.client_id).await?;
            println!("{report}");
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_membership(outcome: &ApiResponse<()>) {
    match outcome.error_code() {
        None => println!("true"),
        Some(code) => println!("{code}"),
    }
}
