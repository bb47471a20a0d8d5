//! # Operator Console Module / 操作员控制台模块
//!
//! The operator-facing I/O primitives used by the dispatcher and commands.
//! [`TerminalConsole`] prompts with `dialoguer` when stdin is a terminal and
//! falls back to plain line reads when input is piped, so sessions can be
//! scripted.
//!
//! 分发器和命令使用的面向操作员的 I/O 原语。当 stdin 是终端时，
//! [`TerminalConsole`] 使用 `dialoguer` 进行提示；当输入来自管道时，
//! 回退为逐行读取，以便编写会话脚本。

use colored::*;
use dialoguer::{Input, theme::ColorfulTheme};
use std::io::{self, BufRead, IsTerminal, Write};

/// Width of the horizontal rule printed between menu iterations.
const RULE_WIDTH: usize = 63;

/// Output and prompting surface for an operator session.
pub trait Console {
    /// Writes a line to the operator's output stream.
    fn out(&mut self, line: &str);

    /// Writes a line to the operator's error stream.
    fn err(&mut self, line: &str);

    /// Writes a line reporting a successful outcome.
    fn success(&mut self, line: &str) {
        self.out(line);
    }

    fn hr(&mut self) {
        self.out(&"-".repeat(RULE_WIDTH));
    }

    /// Asks for one of `choices`. Implementations may constrain the answer
    /// to the set; callers must still handle anything else.
    fn ask_choice(&mut self, prompt: &str, choices: &[&str]) -> io::Result<String>;

    /// Asks for free text. End of input is an `UnexpectedEof` error.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// A [`Console`] bound to the process's stdin, stdout and stderr.
pub struct TerminalConsole {
    theme: ColorfulTheme,
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_plain_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt} ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "operator input closed",
            ));
        }
        Ok(line.trim().to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn out(&mut self, line: &str) {
        println!("{line}");
    }

    fn err(&mut self, line: &str) {
        eprintln!("{}", line.red());
    }

    fn success(&mut self, line: &str) {
        println!("{} {}", "✔".green(), line.bold());
    }

    fn ask_choice(&mut self, prompt: &str, choices: &[&str]) -> io::Result<String> {
        let options = choices.join("/");
        let prompt = format!("{prompt} ({options})");
        if !self.interactive {
            return self.read_plain_line(&format!("{prompt} >"));
        }

        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), String> {
                if choices.iter().any(|c| c.eq_ignore_ascii_case(input.trim())) {
                    Ok(())
                } else {
                    Err(options.clone())
                }
            })
            .interact_text()
            .map(|input| input.trim().to_string())
            .map_err(into_io_error)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        if !self.interactive {
            return self.read_plain_line(&format!("{prompt}\n>"));
        }

        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(|input| input.trim().to_string())
            .map_err(into_io_error)
    }
}

fn into_io_error(err: dialoguer::Error) -> io::Error {
    io::Error::other(err)
}
