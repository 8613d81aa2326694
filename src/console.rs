//! Line-oriented I/O boundary between the menu and the terminal.

use std::io::{self, BufRead, Write};

/// What the menu needs from a terminal: print a line, read a line.
pub trait Console {
    /// Print one line of output.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Show `prompt` and block for one line of input.
    ///
    /// Returns `None` once input is exhausted. The trailing newline is removed.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Console over any reader/writer pair; `StdConsole::stdio()` for the real terminal.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

// =============================================================================
// Shared test utilities
// =============================================================================

#[cfg(test)]
pub mod test_utils {
    use std::collections::VecDeque;
    use std::io;

    use super::Console;

    /// In-memory console fed from a fixed script of input lines.
    #[derive(Default)]
    pub struct ScriptedConsole {
        input: VecDeque<String>,
        pub output: Vec<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedConsole {
        pub fn new<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                input: lines.into_iter().map(Into::into).collect(),
                ..Self::default()
            }
        }

        /// True if any printed line contains `needle`.
        pub fn printed(&self, needle: &str) -> bool {
            self.output.iter().any(|line| line.contains(needle))
        }

        pub fn remaining_input(&self) -> usize {
            self.input.len()
        }
    }

    impl Console for ScriptedConsole {
        fn say(&mut self, line: &str) -> io::Result<()> {
            self.output.push(line.to_string());
            Ok(())
        }

        fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.input.pop_front())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_strips_line_endings() {
        let input = io::Cursor::new(b"first\r\nsecond\nthird".to_vec());
        let mut console = StdConsole::new(input, Vec::new());

        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("third"));
        assert_eq!(console.prompt("> ").unwrap(), None);
    }

    #[test]
    fn test_prompt_and_say_write_output() {
        let input = io::Cursor::new(b"x\n".to_vec());
        let mut console = StdConsole::new(input, Vec::new());

        console.say("hello").unwrap();
        console.prompt("Enter: ").unwrap();

        let written = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(written, "hello\nEnter: ");
    }
}
