//! Console I/O for the command front end.
//!
//! Commands never touch stdin/stdout directly; they get a [`Console`] so the
//! same flows run against a terminal or a scripted buffer.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use std::collections::VecDeque;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Heading,
    Success,
    Failure,
    Warning,
    Prompt,
}

pub trait Console {
    /// Shows `prompt` and returns the trimmed answer. Closed input is an
    /// `UnexpectedEof` error.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    fn emit(&mut self, style: Style, text: &str);

    fn line(&mut self, text: &str) {
        self.emit(Style::Plain, text);
    }

    fn heading(&mut self, text: &str) {
        self.emit(Style::Heading, text);
    }

    fn success(&mut self, text: &str) {
        self.emit(Style::Success, text);
    }

    fn failure(&mut self, text: &str) {
        self.emit(Style::Failure, text);
    }

    fn warning(&mut self, text: &str) {
        self.emit(Style::Warning, text);
    }

    fn field(&mut self, name: &str, value: &str) {
        self.emit(Style::Plain, &format!("{name}: {value}"));
    }

    fn prompt_text(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let answer = self.read_line(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    fn prompt_int(&mut self, prompt: &str, default: Option<i32>) -> io::Result<i32> {
        let prompt = match default {
            Some(d) => format!("{prompt} [{d}]"),
            None => prompt.to_string(),
        };

        loop {
            let answer = self.read_line(&prompt)?;
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(d);
                }
                continue;
            }
            match answer.parse() {
                Ok(n) => return Ok(n),
                Err(_) => self.failure(&format!("Error: '{answer}' is not a valid integer.")),
            }
        }
    }

    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.read_line(&format!("{prompt} [y/N]"))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Stdin/stdout console with coloured status lines.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(input.trim().to_string())
    }

    fn emit(&mut self, style: Style, text: &str) {
        match style {
            Style::Plain | Style::Prompt => println!("{text}"),
            Style::Heading => println!("{}", text.if_supports_color(Stdout, |t| t.bold())),
            Style::Success => println!("{}", text.if_supports_color(Stdout, |t| t.green())),
            Style::Failure => println!("{}", text.if_supports_color(Stdout, |t| t.red())),
            Style::Warning => println!("{}", text.if_supports_color(Stdout, |t| t.yellow())),
        }
    }
}

/// In-memory console fed from a list of answers. Everything shown, prompts
/// included, is kept in order.
#[derive(Debug, Default)]
pub struct BufferedConsole {
    answers: VecDeque<String>,
    lines: Vec<(Style, String)>,
}

impl BufferedConsole {
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[(Style, String)] {
        &self.lines
    }

    /// Whether any line of `style` contains `needle`.
    #[must_use]
    pub fn shows(&self, style: Style, needle: &str) -> bool {
        self.lines
            .iter()
            .any(|(s, text)| *s == style && text.contains(needle))
    }

    #[must_use]
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl Console for BufferedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.lines.push((Style::Prompt, prompt.to_string()));
        self.answers
            .pop_front()
            .map(|a| a.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }

    fn emit(&mut self, style: Style, text: &str) {
        self.lines.push((style, text.to_string()));
    }
}
