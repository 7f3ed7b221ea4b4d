//! Interactive session: a `PromptScreen` driven by stdin lines.
//!
//! Input and the outstanding request are multiplexed on one task, so the
//! session keeps accepting commands while a request is in flight. Only one
//! request exists at a time; the screen's in-flight gate rejects the rest.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use emojify_client::EmojiService;
use emojify_screen::{PendingSubmission, PromptScreen};
use emojify_types::{EmojiRequest, EmojifyError, Result};

use crate::command::{self, Command, HELP};

type RequestFuture = Pin<Box<dyn Future<Output = Result<String>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    screen: PromptScreen,
    service: Arc<dyn EmojiService>,
    request: Option<(PendingSubmission, RequestFuture)>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(service: Arc<dyn EmojiService>, out: W) -> Self {
        Self {
            screen: PromptScreen::new(),
            service,
            request: None,
            out,
        }
    }

    pub fn screen(&self) -> &PromptScreen {
        &self.screen
    }

    pub fn is_waiting(&self) -> bool {
        self.request.is_some()
    }

    pub fn handle(&mut self, command: Command) -> std::io::Result<Flow> {
        match command {
            Command::Generate(prompt) => {
                self.screen.set_prompt(prompt);
                self.start_submit()?;
            }
            Command::SetPrompt(prompt) => self.screen.set_prompt(prompt),
            Command::SetCount(count) => self.screen.set_emoji_count(count),
            Command::Submit => self.start_submit()?,
            Command::Clear => {
                self.screen.clear();
                writeln!(self.out, "Cleared.")?;
            }
            Command::List => self.print_results()?,
            Command::Status => self.print_status()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    /// Resolves with the outstanding request's outcome; never resolves when
    /// nothing is in flight.
    pub async fn next_outcome(&mut self) -> Result<String> {
        match self.request.as_mut() {
            Some((_, fut)) => fut.await,
            None => std::future::pending().await,
        }
    }

    pub fn complete(&mut self, outcome: Result<String>) -> std::io::Result<()> {
        let Some((pending, _)) = self.request.take() else {
            return Ok(());
        };
        if self.screen.finish_submit(pending, outcome).is_ok() {
            let index = self.screen.results().len();
            if let Some(emojis) = self.screen.results().last() {
                writeln!(self.out, "{index:>3}. {emojis}")?;
            }
        }
        self.flush_notices()
    }

    /// Let the outstanding request run to completion, if there is one.
    pub async fn drain(&mut self) -> std::io::Result<()> {
        if self.is_waiting() {
            writeln!(self.out, "Waiting for the current request to finish...")?;
            let outcome = self.next_outcome().await;
            self.complete(outcome)?;
        }
        Ok(())
    }

    fn start_submit(&mut self) -> std::io::Result<()> {
        match self.screen.begin_submit() {
            Ok(pending) => {
                let fut = start_request(&self.service, pending.request().clone());
                self.request = Some((pending, fut));
                writeln!(self.out, "{}", self.screen.submit_label())?;
            }
            Err(err @ EmojifyError::Busy) => writeln!(self.out, "{}", err.user_message())?,
            Err(_) => self.flush_notices()?,
        }
        Ok(())
    }

    fn flush_notices(&mut self) -> std::io::Result<()> {
        for notice in self.screen.take_notices() {
            writeln!(self.out, "{notice}")?;
        }
        Ok(())
    }

    fn print_results(&mut self) -> std::io::Result<()> {
        if self.screen.results().is_empty() {
            writeln!(self.out, "No results yet.")?;
        }
        for (i, emojis) in self.screen.results().iter().enumerate() {
            writeln!(self.out, "{:>3}. {}", i + 1, emojis)?;
        }
        Ok(())
    }

    fn print_status(&mut self) -> std::io::Result<()> {
        let screen = &self.screen;
        writeln!(self.out, "Endpoint: {}", self.service.endpoint())?;
        writeln!(self.out, "Prompt:   {}", screen.prompt())?;
        writeln!(self.out, "Count:    {}", screen.emoji_count())?;
        writeln!(self.out, "Results:  {}", screen.results().len())?;
        writeln!(
            self.out,
            "[{}] {}  [{}] Clear",
            if screen.can_submit() { "x" } else { " " },
            screen.submit_label(),
            if screen.can_clear() { "x" } else { " " },
        )?;
        Ok(())
    }
}

fn start_request(service: &Arc<dyn EmojiService>, request: EmojiRequest) -> RequestFuture {
    let service = Arc::clone(service);
    Box::pin(async move { service.generate(&request).await })
}

/// Run the interactive session on stdin/stdout until `/quit` or end of input.
pub async fn run(service: Arc<dyn EmojiService>) -> anyhow::Result<()> {
    let mut session = Session::new(service, std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    writeln!(session.out, "Get Emojis from Prompt. Type /help for commands.")?;

    loop {
        tokio::select! {
            outcome = session.next_outcome(), if session.is_waiting() => {
                session.complete(outcome)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match command::parse(&line) {
                    Ok(cmd) => {
                        if session.handle(cmd)? == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => writeln!(session.out, "{e}")?,
                }
            }
        }
        session.out.flush()?;
    }

    session.drain().await?;
    session.out.flush()?;
    tracing::info!(
        results = session.screen().results().len(),
        "session ended"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
