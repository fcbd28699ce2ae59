//! Operator helper for checking a Cardwire installation.
//!
//! Usage:
//!
//! ```text
//! cardwire <operation> <settings-path> [board-id]
//! ```
//!
//! The `operation` must be `check`, `boards`, `lists`, or `labels`. The JSON
//! document at `settings-path` holds the persisted settings, for example:
//!
//! ```json
//! {
//!   "ApiKey": "app-key",
//!   "ApiToken": "user-token",
//!   "TargetBoard": "5f1c0a",
//!   "TargetList": "5f1c0b",
//!   "Templates": ["article"],
//!   "StatusChangeTrashed": "archive"
//! }
//! ```
//!
//! `check` resolves the configuration and validates the token. The other
//! operations list what the settings screen offers: boards, the lists of a
//! board, or the labels of a board. `lists` and `labels` use `board-id`
//! when given and `TargetBoard` otherwise.

use camino::Utf8PathBuf;
use cardwire::board::{
    adapters::HttpBoardService,
    domain::{BoardDomainError, BoardId},
    ports::{BoardService, BoardServiceError},
};
use cardwire::sync::{
    adapters::{SettingsFileError, load_settings},
    domain::{ConfigurationError, SyncSettings, TriggerConfiguration},
};
use std::env;
use std::io::{self, Write};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running an operator command.
#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Settings(#[from] SettingsFileError),
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invalid board id: {0}")]
    BoardId(#[from] BoardDomainError),
    #[error(transparent)]
    Board(#[from] BoardServiceError),
    #[error("the board service rejected the API token")]
    InvalidToken,
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Check,
    Boards,
    Lists,
    Labels,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, CliError> {
        match arg {
            "check" => Ok(Self::Check),
            "boards" => Ok(Self::Boards),
            "lists" => Ok(Self::Lists),
            "labels" => Ok(Self::Labels),
            other => Err(CliError::InvalidArgs(format!(
                "unknown operation '{other}'; expected check, boards, lists, or labels"
            ))),
        }
    }
}

#[derive(Debug)]
struct Invocation {
    operation: Operation,
    settings_path: Utf8PathBuf,
    board_id: Option<String>,
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let args = collect_args()?;
    let invocation = parse_args(args.into_iter())?;
    run(&invocation).map_err(Into::into)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn collect_args() -> Result<Vec<String>, CliError> {
    env::args_os()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| CliError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Invocation, CliError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| CliError::InvalidArgs("missing operation argument".into()))
        .and_then(|arg| Operation::parse(&arg))?;
    let settings_path = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| CliError::InvalidArgs("missing settings path argument".into()))?;
    let board_id = args.next();
    if let Some(extra) = args.next() {
        return Err(CliError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    if board_id.is_some() && matches!(operation, Operation::Check | Operation::Boards) {
        return Err(CliError::InvalidArgs(
            "board id is only accepted by lists and labels".into(),
        ));
    }
    Ok(Invocation {
        operation,
        settings_path,
        board_id,
    })
}

fn run(invocation: &Invocation) -> Result<(), CliError> {
    let settings = load_settings(&invocation.settings_path)?;
    let config = TriggerConfiguration::resolve(&settings)?;
    let service = build_service(&settings)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    let board_id = match invocation.board_id.as_deref() {
        Some(raw) => Some(BoardId::new(raw)?),
        None => config.target_board().cloned(),
    };

    let lines = runtime.block_on(execute(&service, invocation.operation, board_id))?;
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}").map_err(CliError::Output)?;
    }
    Ok(())
}

fn build_service(settings: &SyncSettings) -> Result<HttpBoardService, CliError> {
    let credentials = settings.credentials()?;
    let service = match settings.api_base.as_deref() {
        Some(base) if !base.trim().is_empty() => {
            HttpBoardService::with_base_url(credentials, base.trim())?
        }
        _ => HttpBoardService::new(credentials)?,
    };
    Ok(service)
}

async fn execute(
    service: &HttpBoardService,
    operation: Operation,
    board_id: Option<BoardId>,
) -> Result<Vec<String>, CliError> {
    if !service.is_token_valid().await? {
        return Err(CliError::InvalidToken);
    }
    match operation {
        Operation::Check => {
            info!(base_url = %service.base_url(), "configuration and token are valid");
            Ok(vec!["ok".to_owned()])
        }
        Operation::Boards => Ok(service
            .list_boards()
            .await?
            .into_iter()
            .map(|board| format!("{}\t{}", board.id, board.name))
            .collect()),
        Operation::Lists => {
            let board = require_board(board_id)?;
            Ok(service
                .list_lists(&board)
                .await?
                .into_iter()
                .map(|list| format!("{}\t{}", list.id, list.name))
                .collect())
        }
        Operation::Labels => {
            let board = require_board(board_id)?;
            Ok(service
                .list_labels(&board)
                .await?
                .into_iter()
                .map(|label| format!("{}\t{}", label.id, label.display_name()))
                .collect())
        }
    }
}

fn require_board(board_id: Option<BoardId>) -> Result<BoardId, CliError> {
    board_id.ok_or_else(|| {
        CliError::InvalidArgs("no board id given and TargetBoard is not configured".into())
    })
}
