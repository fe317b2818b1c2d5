use crate::error::{Result, ToolError};
use std::fmt;
use std::process::Command;
use tracing::debug;

/// Внешняя команда: программа и её аргументы без участия shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
                write!(f, " '{}'", arg.replace('\'', "'\\''"))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Результат выполнения внешней команды
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[allow(dead_code)]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[allow(dead_code)]
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Запуск внешних программ (osascript, xdotool, pbpaste, plutil, launchctl, nix)
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput>;

    /// Выполнить команду и вернуть stdout, ненулевой код возврата считается ошибкой
    fn run_checked(&self, command: &ExternalCommand) -> Result<String> {
        let output = self.run(command)?;
        if output.success {
            Ok(output.stdout)
        } else {
            Err(ToolError::CommandFailed {
                command: command.to_string(),
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

/// Запуск через std::process::Command
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput> {
        debug!("Запуск команды: {}", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|e| {
                debug!("{} не найден или не работает: {}", command.program, e);
                ToolError::CommandFailed {
                    command: command.to_string(),
                    stderr: e.to_string(),
                }
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
