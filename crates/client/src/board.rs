//! Board state: the fetched list plus the pending input buffer.
//!
//! The board only ever shows what the server confirmed. An add sends the
//! create request, clears the buffer and then re-fetches the whole list;
//! nothing is inserted locally ahead of the server.
//!
//! A [`Board`] is a cheap handle over shared state, so several adds may be in
//! flight at once. Each one completes and re-fetches on its own.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use todo_board_core::{Todo, TodoId};

use crate::api::TodoClient;

/// Whether a create round trip (request plus re-fetch) is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Clone)]
pub struct Board {
    client: TodoClient,
    state: Arc<Mutex<BoardState>>,
}

#[derive(Debug, Default)]
struct BoardState {
    todos: Vec<Todo>,
    title: String,
    in_flight: usize,
}

impl Board {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    /// Initial load.
    pub async fn mount(&self) {
        self.refresh().await;
    }

    pub fn set_title(&self, value: impl Into<String>) {
        self.state().title = value.into();
    }

    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state().todos.clone()
    }

    /// Number of adds whose round trip has not finished yet.
    pub fn in_flight(&self) -> usize {
        self.state().in_flight
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight() > 0 {
            Phase::Submitting
        } else {
            Phase::Idle
        }
    }

    /// Submits the buffer. Returns `false` without sending anything when the
    /// trimmed buffer is empty.
    ///
    /// Server-side rejections are ignored and the board still clears and
    /// refreshes. A transport failure leaves the buffer untouched. Nothing
    /// stops a second add from starting while this one is in flight.
    pub async fn add(&self) -> bool {
        let title = {
            let mut state = self.state();
            if state.title.trim().is_empty() {
                return false;
            }
            state.in_flight += 1;
            state.title.clone()
        };

        let delivered = match self.client.create(&title).await {
            Ok(()) => true,
            Err(err) if err.is_status() => {
                debug!(stage = "client", error = %err, "create rejected by server");
                true
            }
            Err(err) => {
                debug!(stage = "client", error = %err, "create request failed");
                false
            }
        };

        if delivered {
            self.state().title.clear();
            self.refresh().await;
        }

        self.state().in_flight -= 1;
        true
    }

    /// Projects the current state into what the user sees.
    pub fn render(&self) -> BoardView {
        let state = self.state();
        BoardView {
            input: state.title.clone(),
            items: state
                .todos
                .iter()
                .map(|todo| (todo.id, todo.title.clone()))
                .collect(),
        }
    }

    async fn refresh(&self) {
        match self.client.list().await {
            Ok(todos) => {
                self.state().todos = todos;
            }
            Err(err) => debug!(stage = "client", error = %err, "failed to fetch todos"),
        }
    }

    // The guarded state holds no invariant a panic could break halfway.
    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Rendered board: input box, add button and the list keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub input: String,
    pub items: Vec<(TodoId, String)>,
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Todo List")?;
        writeln!(f, "[{}] [Add]", self.input)?;
        for (_, title) in &self.items {
            writeln!(f, "  - {title}")?;
        }
        Ok(())
    }
}
