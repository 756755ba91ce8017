//! Interactive session: reads one command per line, runs it against the
//! post service and reports the outcome.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::application::posts::{Notice, PostError, PostService};

use super::views::{TemplateRenderError, render_document, render_html, render_text};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("session i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Render(#[from] TemplateRenderError),
}

#[derive(Debug, Parser)]
#[command(
    name = "postboard",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SessionCommand {
    /// Load a new batch of posts (1-100).
    Fetch { count: u32 },
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Replace title and body of the post at a display position.
    #[command(alias = "put")]
    Replace {
        position: usize,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Change only the title of the post at a display position.
    Patch {
        position: usize,
        #[arg(long)]
        title: String,
    },
    /// Show the posts currently on screen.
    List,
    /// Write the posts on screen as an HTML document.
    Export {
        path: PathBuf,
        /// Write only the post nodes, without the surrounding page.
        #[arg(long)]
        fragment: bool,
    },
    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Split a line with shell quoting rules and parse it as a session command.
///
/// `Ok(None)` means the line was blank.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, String> {
    let words = shlex::split(line).ok_or_else(|| "unbalanced quotes".to_string())?;
    if words.is_empty() {
        return Ok(None);
    }
    SessionLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|err| err.render().to_string())
}

pub struct Shell<W> {
    service: PostService,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(service: PostService, out: W) -> Self {
        Self { service, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn greet(&mut self) -> Result<(), ShellError> {
        writeln!(
            self.out,
            "postboard session; type `help` for commands, `quit` to leave."
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Run commands from `input` until it ends or a quit command arrives.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.execute_line(&line).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub async fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Ok(Flow::Continue),
            Err(message) => {
                write!(self.out, "{message}")?;
                if !message.ends_with('\n') {
                    writeln!(self.out)?;
                }
                self.out.flush()?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute(&mut self, command: SessionCommand) -> Result<Flow, ShellError> {
        debug!(?command, "session command");
        let outcome = match command {
            SessionCommand::Fetch { count } => {
                let outcome = self.service.fetch_batch(count).await;
                let fetched = outcome.is_ok();
                self.report(outcome)?;
                if fetched {
                    self.list()?;
                }
                return Ok(Flow::Continue);
            }
            SessionCommand::Create { title, body } => self.service.create(title, body).await,
            SessionCommand::Replace {
                position,
                title,
                body,
            } => self.service.replace(position, title, body).await,
            SessionCommand::Patch { position, title } => {
                self.service.partial_update(position, title).await
            }
            SessionCommand::List => {
                self.list()?;
                return Ok(Flow::Continue);
            }
            SessionCommand::Export { path, fragment } => {
                let view = self.service.view();
                let document = if fragment {
                    render_html(&view)?
                } else {
                    render_document(&view)?
                };
                match tokio::fs::write(&path, document).await {
                    Ok(()) => writeln!(self.out, "Wrote {}.", path.display())?,
                    Err(err) => writeln!(self.out, "! Could not write {}: {err}", path.display())?,
                }
                self.out.flush()?;
                return Ok(Flow::Continue);
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        };
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn report(&mut self, outcome: Result<Notice, PostError>) -> Result<(), ShellError> {
        match outcome {
            Ok(notice) => writeln!(self.out, "{notice}")?,
            Err(err) => writeln!(self.out, "! {}", err.notification())?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn list(&mut self) -> Result<(), ShellError> {
        write!(self.out, "{}", render_text(&self.service.snapshot()))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use httpmock::MockServer;
    use url::Url;

    use crate::application::posts::{FetchSettings, StartOffset};
    use crate::infra::http::HttpPostGateway;

    use super::*;

    fn shell(server: &MockServer) -> Shell<Vec<u8>> {
        let base = Url::parse(&server.base_url()).expect("base url");
        let gateway = HttpPostGateway::new(base, None).expect("gateway");
        let fetch = FetchSettings {
            start: StartOffset::Fixed(0),
            ..FetchSettings::default()
        };
        Shell::new(PostService::new(Arc::new(gateway), fetch), Vec::new())
    }

    fn output(shell: Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn parse_line_honours_quotes() {
        let parsed = parse_line(r#"replace 3 --title "Hello world" --body 'some body'"#)
            .expect("parses");
        assert_eq!(
            parsed,
            Some(SessionCommand::Replace {
                position: 3,
                title: "Hello world".into(),
                body: "some body".into(),
            })
        );
    }

    #[test]
    fn parse_line_accepts_aliases_and_blank_lines() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("exit"), Ok(Some(SessionCommand::Quit)));
        assert!(matches!(
            parse_line("put 1 --title a --body b"),
            Ok(Some(SessionCommand::Replace { position: 1, .. }))
        ));
    }

    #[test]
    fn parse_line_reports_usage_errors() {
        assert!(parse_line("fetch many").is_err());
        assert!(parse_line("patch 2").is_err());
        assert!(parse_line("create --title \"open").is_err());
    }

    #[tokio::test]
    async fn invalid_position_is_reported_and_session_continues() -> Result<(), ShellError> {
        let server = MockServer::start();
        let put = server.mock(|when, then| {
            when.method("PUT");
            then.status(200).body("{}");
        });

        let mut shell = shell(&server);
        let flow = shell.execute_line("replace 4 --title T --body B").await?;

        assert_eq!(flow, Flow::Continue);
        put.assert_calls(0);
        assert_eq!(output(shell), "! Invalid post number!\n");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_prints_notice_and_listing() -> Result<(), ShellError> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET")
                .path("/posts")
                .query_param("_start", "0")
                .query_param("_limit", "2");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"[{"id":1,"title":"a","body":"x"},{"id":2,"title":"b","body":"y"}]"#);
        });

        let mut shell = shell(&server);
        shell.execute_line("fetch 2").await?;

        let text = output(shell);
        assert!(text.starts_with("Loaded 2 posts.\n"));
        assert!(text.contains("#2 [id 2] b"));
        Ok(())
    }

    #[tokio::test]
    async fn quit_stops_the_run_loop() -> Result<(), ShellError> {
        let server = MockServer::start();
        let mut shell = shell(&server);
        let input: &[u8] = b"quit\nfetch 0\n";

        shell.run(input).await?;

        assert!(output(shell).is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn export_writes_html_document() -> Result<(), ShellError> {
        let server = MockServer::start();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("posts.html");

        let mut shell = shell(&server);
        shell
            .execute(SessionCommand::Export {
                path: path.clone(),
                fragment: false,
            })
            .await?;

        let html = std::fs::read_to_string(&path)?;
        assert!(html.contains("posts-container"));
        Ok(())
    }

    #[tokio::test]
    async fn export_fragment_writes_only_post_nodes() -> Result<(), ShellError> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/posts");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"[{"id":1,"title":"a","body":"x"}]"#);
        });
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nodes.html");

        let mut shell = shell(&server);
        shell.execute_line("fetch 1").await?;
        let line = format!("export '{}' --fragment", path.display());
        shell.execute_line(&line).await?;

        let html = std::fs::read_to_string(&path)?;
        assert!(html.contains("data-id=\"1\""));
        assert!(!html.contains("posts-container"));
        Ok(())
    }
}
