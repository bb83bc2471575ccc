use std::env;

use reqwest::Client;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use url::Url;

use todo_board_client::{Board, TodoClient};
use todo_board_util::load_env_file;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000/";

/// Terminal rendition of the board: every stdin line is typed into the input
/// box and added, then the board is redrawn.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let raw_url = env::var("TODO_BOARD_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
    let client = TodoClient::new(Url::parse(&raw_url)?, Client::builder().build()?);

    let board = Board::new(client);
    board.mount().await;
    print!("{}", board.render());

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        board.set_title(line);
        board.add().await;
        print!("{}", board.render());
    }

    Ok(())
}
