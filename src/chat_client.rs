//! Terminal chat client for a running server

use anyhow::Context;
use reqwest::Client;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::api::{ChatRequest, SESSION_HEADER};
use crate::models::Reply;

const RULE_WIDTH: usize = 50;

pub struct ChatClient {
    client: Client,
    endpoint: String,
    session_id: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat", base_url.trim_end_matches('/')),
            session_id: format!("terminal-{}", std::process::id()),
        }
    }

    pub async fn send(&self, query: &str) -> anyhow::Result<Reply> {
        let reply = self
            .client
            .post(&self.endpoint)
            .header(SESSION_HEADER, &self.session_id)
            .json(&ChatRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("Could not connect to {}", self.endpoint))?
            .error_for_status()?
            .json::<Reply>()
            .await?;
        Ok(reply)
    }
}

fn is_exit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit")
}

/// Read queries line by line until `exit`, `quit` or end of input
pub async fn run<R, W>(client: &ChatClient, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let rule = "=".repeat(RULE_WIDTH);
    output
        .write_all(
            format!(
                "\n{rule}\nSKYCAST TERMINAL CHAT\n   - Type 'quit' or 'exit' to stop.\n   - Try: 'Weather in London' or 'What is a cyclone?'\n{rule}\n\n"
            )
            .as_bytes(),
        )
        .await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if is_exit(query) {
            output.write_all(b"Goodbye!\n").await?;
            break;
        }
        if query.is_empty() {
            continue;
        }

        let text = match client.send(query).await {
            Ok(reply) => {
                let source = serde_json::to_value(reply.source)?;
                format!(
                    "Bot ({}): {}\n",
                    source.as_str().unwrap_or_default(),
                    reply.response
                )
            }
            Err(err) => format!("Error: {err:#}\n"),
        };
        output.write_all(text.as_bytes()).await?;
        output
            .write_all(format!("{}\n", "-".repeat(RULE_WIDTH)).as_bytes())
            .await?;
    }

    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit("exit"));
        assert!(is_exit("QUIT"));
        assert!(!is_exit("quitting"));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = ChatClient::new("http://localhost:8000/");
        assert_eq!(client.endpoint, "http://localhost:8000/chat");
    }

    #[tokio::test]
    async fn test_quit_ends_without_requests() {
        let client = ChatClient::new("http://127.0.0.1:9");
        let mut output = Vec::new();
        run(&client, &b"\n   \nquit\n"[..], &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("Goodbye!\n"));
        assert!(!text.contains("Bot"));
        assert!(!text.contains("Error"));
    }
}
