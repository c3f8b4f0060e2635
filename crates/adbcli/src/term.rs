use std::io::{self, BufRead};

use adbcli_core::Terminal;
use adbcli_platform::interrupt::Interrupt;
use console::{Term, style};

/// [`Terminal`] on stdout/stdin.
///
/// Piped input is read line by line and ends the session at EOF.
pub struct ConsoleTerminal {
    term: Term,
    interrupt: Interrupt,
}

impl ConsoleTerminal {
    pub fn new(interrupt: Interrupt) -> Self {
        Self {
            term: Term::stdout(),
            interrupt,
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let line = if self.term.is_term() {
            self.term.read_line()?
        } else {
            let mut buf = String::new();
            if io::stdin().lock().read_line(&mut buf)? == 0 {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
            buf.trim_end_matches(['\r', '\n']).to_string()
        };
        if self.interrupt.take() {
            return Err(io::ErrorKind::Interrupted.into());
        }
        Ok(line)
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.term.write_str(text)?;
        self.term.flush()
    }
}

impl Terminal for ConsoleTerminal {
    fn show(&mut self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }

    fn ask(&mut self, label: &str, default: Option<&str>) -> io::Result<String> {
        let text = match default {
            Some(d) if !d.is_empty() => format!("{} {}: ", style(label).bold(), style(format!("({d})")).cyan()),
            _ => format!("{}: ", style(label).bold()),
        };
        self.prompt(&text)?;
        let line = self.read_line()?;
        Ok(match default {
            Some(d) if line.trim().is_empty() => d.to_string(),
            _ => line,
        })
    }

    fn confirm(&mut self, label: &str) -> io::Result<bool> {
        loop {
            self.prompt(&format!("{} {}: ", style(label).bold(), style("[y/n]").magenta()))?;
            match self.read_line()?.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.show(&style("Please enter Y or N").red().to_string())?,
            }
        }
    }

    fn pause(&mut self, label: &str) -> io::Result<()> {
        self.prompt(&format!("\n{label}"))?;
        self.read_line().map(drop)
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        Ok(())
    }
}
