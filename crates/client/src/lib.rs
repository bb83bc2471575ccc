//! HTTP client for the todo service and the board state that drives the UI.

pub mod api;
pub mod board;

pub use api::{ClientError, TodoClient};
pub use board::{Board, BoardView, Phase};
