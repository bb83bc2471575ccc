use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use thiserror::Error;
use url::Url;

use todo_board_core::Todo;

/// Client for the `/todos` endpoints.
#[derive(Clone)]
pub struct TodoClient {
    http: Client,
    base_url: Url,
}

impl TodoClient {
    /// Creates a client rooted at `base_url`. A missing trailing slash is added
    /// so that relative joins stay under the given path.
    pub fn new(mut base_url: Url, http: Client) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches every todo, newest first.
    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let url = self.base_url.join("todos")?;
        let response = self.http.get(url).send().await?;
        parse_json(response).await
    }

    /// Submits a new title. The server does not echo the created row.
    pub async fn create(&self, title: &str) -> Result<(), ClientError> {
        let url = self.base_url.join("todos")?;
        let response = self
            .http
            .post(url)
            .json(&json!({ "title": title }))
            .send()
            .await?;
        ensure_success(response).await
    }
}

/// Errors produced by the todo client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ClientError {
    /// `true` when the server answered, as opposed to a transport failure.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

async fn ensure_success(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(ClientError::Status { status, body });
    }
    Ok(())
}

async fn parse_json<T>(response: Response) -> Result<T, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(ClientError::Status { status, body });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use todo_board_core::TodoId;

    fn client(server: &MockServer, path: &str) -> TodoClient {
        let base = Url::parse(&server.url(path)).expect("url");
        TodoClient::new(base, Client::builder().build().expect("client"))
    }

    #[tokio::test]
    async fn list_parses_todos() {
        let server = MockServer::start_async().await;
        let client = client(&server, "/");

        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/todos");
                then.status(200).json_body(serde_json::json!([
                    { "id": 2, "title": "Walk dog" },
                    { "id": 1, "title": "Buy milk" }
                ]));
            })
            .await;

        let todos = client.list().await.expect("list todos");
        mock.assert_async().await;

        assert_eq!(
            todos,
            vec![
                Todo::new(TodoId::new(2), "Walk dog"),
                Todo::new(TodoId::new(1), "Buy milk"),
            ]
        );
    }

    #[tokio::test]
    async fn create_posts_title_as_json() {
        let server = MockServer::start_async().await;
        let client = client(&server, "/");

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/todos")
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({ "title": "Buy milk" }));
                then.status(201).body("Todo created");
            })
            .await;

        client.create("Buy milk").await.expect("create todo");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn base_path_without_trailing_slash_is_kept() {
        let server = MockServer::start_async().await;
        let client = client(&server, "/api");
        assert!(client.base_url().path().ends_with("/api/"));

        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/todos");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let todos = client.list().await.expect("list todos");
        mock.assert_async().await;
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn validation_error_returns_status_and_body() {
        let server = MockServer::start_async().await;
        let client = client(&server, "/");

        server
            .mock_async(|when, then| {
                when.method(POST).path("/todos");
                then.status(400)
                    .json_body(serde_json::json!({ "error": "Title is required" }));
            })
            .await;

        let err = client.create("").await.expect_err("should error");
        assert!(err.is_status());
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("Title is required"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
