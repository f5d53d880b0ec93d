//! Line-oriented driver.
//!
//! Reads commands from any async reader (stdin in production) and renders to
//! any writer (stdout in production). Unparseable lines get an error line and
//! never reach the App.

use std::{
    collections::VecDeque,
    io::{self, Write},
};

use finstagram_app::{App, Driver, Environment, UserInput};
use finstagram_store::KeyValueStore;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

use crate::{
    commands::{Command, HELP, parse_line},
    render::render,
};

/// Text frontend implementing [`Driver`].
pub struct LineDriver<R, W> {
    lines: Lines<BufReader<R>>,
    out: W,
    /// Inputs parsed from one line but not yet delivered.
    queued: VecDeque<UserInput>,
}

impl LineDriver<tokio::io::Stdin, io::Stdout> {
    /// Driver over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), io::stdout())
    }
}

impl<R, W> LineDriver<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: Write + Send,
{
    /// Driver reading commands from `input` and rendering to `out`.
    pub fn new(input: R, out: W) -> Self {
        Self { lines: BufReader::new(input).lines(), out, queued: VecDeque::new() }
    }
}

impl<R, W> Driver for LineDriver<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: Write + Send,
{
    type Error = io::Error;

    async fn poll_input(&mut self) -> Result<Option<UserInput>, Self::Error> {
        loop {
            if let Some(input) = self.queued.pop_front() {
                return Ok(Some(input));
            }

            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            match parse_line(&line) {
                Ok(Command::Inputs(inputs)) => self.queued.extend(inputs),
                Ok(Command::Help) => {
                    self.out.write_all(HELP.as_bytes())?;
                    self.out.flush()?;
                },
                Err(e) => {
                    tracing::debug!(%line, error = %e, "unparseable command");
                    writeln!(self.out, "error: {e} (try `help`)")?;
                    self.out.flush()?;
                },
            }
        }
    }

    fn render<E: Environment, S: KeyValueStore>(
        &mut self,
        app: &App<E, S>,
    ) -> Result<(), Self::Error> {
        writeln!(self.out)?;
        render(&mut self.out, app)?;
        self.out.flush()
    }

    fn stop(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "failed to flush output");
        }
    }
}
