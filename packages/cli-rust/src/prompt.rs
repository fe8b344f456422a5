//! Line-based prompts
//!
//! Every question prints a prompt and reads one line. Retries are loops, so a
//! stream of bad answers never grows the stack. [`TermPrompter`] asks through
//! dialoguer on an interactive terminal; [`Prompter`] reads any `BufRead`,
//! which covers piped input and in-memory sessions.

use std::fmt;
use std::io::{self, BufRead, Write};

use console::{Term, style};
use dialoguer::Input;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input reached end-of-file before an answer was given
    #[error("input closed before an answer was given")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                PromptError::InputClosed
            }
            dialoguer::Error::IO(e) => PromptError::Io(e),
        }
    }
}

/// A source of answers and a place to print
pub trait Prompt {
    /// Print `prompt` and return the next line without its terminator
    fn ask_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Print a line of plain output
    fn say(&mut self, line: impl fmt::Display) -> Result<(), PromptError>;

    /// Like [`ask_line`](Self::ask_line), re-asking until the answer is not blank
    fn ask_required(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.ask_line(prompt)?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
            self.say(style("This cannot be empty.").yellow())?;
        }
    }
}

/// Prompts over any line-oriented input and any output
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub(crate) fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => return Err(PromptError::InputClosed),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    debug!("read interrupted, retrying");
                }
                Err(e) => return Err(PromptError::Io(e)),
            }
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompt for Prompter<R, W> {
    fn ask_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        writeln!(self.output, "{}", style(prompt).cyan())?;
        self.output.flush()?;
        self.read_line()
    }

    fn say(&mut self, line: impl fmt::Display) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

/// Prompts on the attached terminal with line editing
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Prompt for TermPrompter {
    fn ask_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }

    fn say(&mut self, line: impl fmt::Display) -> Result<(), PromptError> {
        self.term.write_line(&line.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn ask_line_returns_text_without_newline() {
        let mut p = prompter("example.com\r\n");
        assert_eq!(p.ask_line("Domain?").unwrap(), "example.com");
        assert!(output_of(p).contains("Domain?"));
    }

    #[test]
    fn ask_line_keeps_inner_spaces() {
        let mut p = prompter("a.com  www.a.com\n");
        assert_eq!(p.ask_line("Domain?").unwrap(), "a.com  www.a.com");
    }

    #[test]
    fn ask_line_accepts_last_line_without_newline() {
        let mut p = prompter("/srv/www");
        assert_eq!(p.ask_line("Root?").unwrap(), "/srv/www");
    }

    #[test]
    fn ask_line_reports_closed_input() {
        let mut p = prompter("");
        assert!(matches!(p.ask_line("Root?"), Err(PromptError::InputClosed)));
    }

    #[test]
    fn ask_required_reprompts_on_blank() {
        let mut p = prompter("\n   \n/srv/site\n");
        assert_eq!(p.ask_required("Root?").unwrap(), "/srv/site");

        let out = output_of(p);
        assert_eq!(out.matches("Root?").count(), 3);
        assert_eq!(out.matches("This cannot be empty.").count(), 2);
    }

    #[test]
    fn closed_terminal_maps_to_input_closed() {
        let err = dialoguer::Error::IO(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(matches!(PromptError::from(err), PromptError::InputClosed));

        let err = dialoguer::Error::IO(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(matches!(PromptError::from(err), PromptError::Io(_)));
    }

    #[test]
    fn ask_required_fails_when_input_ends_while_blank() {
        let mut p = prompter("\n");
        assert!(matches!(
            p.ask_required("Root?"),
            Err(PromptError::InputClosed)
        ));
    }
}
