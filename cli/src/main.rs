use clap::{Args, Parser, Subcommand};
use msgboard::api::{ApiError, ManageEntry};
use msgboard::config::ConfigError;
use msgboard::render::reply_field_id;
use msgboard::{Access, BoardConfig, HttpBoardApi, ManageView, MessageView, Page, ViewError};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("access denied by the board API")]
    Denied,
    #[error("no board row {row} (board has {len} rows)")]
    NoSuchRow { row: usize, len: usize },
    #[error("row {0} already has a reply")]
    AlreadyReplied(usize),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "msgboard", about = "Message board manage/message views")]
struct Cli {
    /// Board API base URL; defaults to https://api.sugina.cc when unset.
    #[arg(long, env = "BOARD_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Administrator view: list messages and reply to them.
    Manage(ManageCommand),
    /// User view: list messages and post a new one.
    Message(MessageCommand),
}

#[derive(Args, Debug)]
struct ManageCommand {
    #[command(subcommand)]
    command: ManageSubcommand,
}

#[derive(Subcommand, Debug)]
enum ManageSubcommand {
    Show {
        #[arg(long, default_value_t = false, help = "Print entries as JSON instead of the page")]
        json: bool,
    },
    Reply {
        #[arg(long, help = "Zero-based table row to reply to")]
        row: usize,
        #[arg(long)]
        text: String,
    },
}

#[derive(Args, Debug)]
struct MessageCommand {
    #[command(subcommand)]
    command: MessageSubcommand,
}

#[derive(Subcommand, Debug)]
enum MessageSubcommand {
    Show {
        #[arg(long, default_value_t = false, help = "Print entries as JSON instead of the page")]
        json: bool,
    },
    Post {
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = BoardConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    let api = HttpBoardApi::new(&config)?;
    tracing::debug!(api_url = api.base_url(), "board client ready");

    match cli.command {
        Command::Manage(manage) => run_manage(api, manage).await,
        Command::Message(message) => run_message(api, message).await,
    }
}

/// Logs go to stderr so stdout carries only the page or JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_manage(api: HttpBoardApi, manage: ManageCommand) -> Result<(), CliError> {
    let mut view = ManageView::new(api);
    if view.load().await? == Access::Denied {
        print_page(view.page());
        return Err(CliError::Denied);
    }

    match manage.command {
        ManageSubcommand::Show { json } => {
            if json {
                print_json(&serde_json::to_value(view.entries())?)?;
            } else {
                print_page(view.page());
            }
            Ok(())
        }
        ManageSubcommand::Reply { row, text } => {
            let msgid = reply_target(view.entries(), row)?;
            view.page_mut()
                .set_input(&reply_field_id(row), text)
                .map_err(ViewError::from)?;
            view.reply(row, msgid).await?;
            print_page(view.page());
            Ok(())
        }
    }
}

async fn run_message(api: HttpBoardApi, message: MessageCommand) -> Result<(), CliError> {
    let mut view = MessageView::new(api);
    if view.load().await? == Access::Denied {
        print_page(view.page());
        return Err(CliError::Denied);
    }

    match message.command {
        MessageSubcommand::Show { json } => {
            if json {
                print_json(&serde_json::to_value(view.entries())?)?;
            } else {
                print_page(view.page());
            }
            Ok(())
        }
        MessageSubcommand::Post { text } => {
            view.compose(text)?;
            view.post().await?;
            print_page(view.page());
            Ok(())
        }
    }
}

/// Message id behind a table row, provided the row still takes a reply.
fn reply_target(entries: &[ManageEntry], row: usize) -> Result<i64, CliError> {
    let entry = entries
        .get(row)
        .ok_or(CliError::NoSuchRow { row, len: entries.len() })?;
    if entry.reply_text().is_some() {
        return Err(CliError::AlreadyReplied(row));
    }
    Ok(entry.msgid)
}

fn print_page(page: &Page) {
    print!("{}", page.to_html());
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
