use std::fmt::{self, Display};

/// The command to execute on every attempt.
///
/// Built once from the trailing command-line arguments and reused unchanged
/// across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build an invocation from the trailing CLI arguments.
    ///
    /// A single argument is treated as a whole command line and split on
    /// whitespace; several arguments are taken as already tokenized. Returns
    /// `None` when no program name remains.
    pub fn from_cli_args(args: &[String]) -> Option<Self> {
        match args {
            [] => None,
            [line] => {
                let mut tokens = line.split_whitespace().map(str::to_string);
                let program = tokens.next()?;
                Some(Self::new(program, tokens.collect()))
            }
            [program, rest @ ..] => {
                if program.is_empty() {
                    return None;
                }
                Some(Self::new(program.clone(), rest.to_vec()))
            }
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
