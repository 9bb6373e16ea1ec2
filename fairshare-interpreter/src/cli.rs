use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "Usage: fairshare <request.json> [--json | --csv] [--infer-tags]\n       fairshare --eval";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Split {
        path: PathBuf,
        format: OutputFormat,
        infer_tags: bool,
    },
    Eval,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{usage}", usage = USAGE)]
    Usage,
    #[error("unknown option '{0}'\n{usage}", usage = USAGE)]
    UnknownOption(String),
    #[error("--json and --csv cannot be combined")]
    ConflictingFormats,
    #[error("--eval does not take a request file")]
    EvalWithRequest,
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, CliError> {
    let mut path = None;
    let mut format = None;
    let mut infer_tags = false;
    let mut eval = false;

    for arg in args {
        match arg.as_str() {
            "--eval" => eval = true,
            "--infer-tags" => infer_tags = true,
            "--json" | "--csv" => {
                let requested = if arg == "--json" {
                    OutputFormat::Json
                } else {
                    OutputFormat::Csv
                };
                if format.is_some_and(|current| current != requested) {
                    return Err(CliError::ConflictingFormats);
                }
                format = Some(requested);
            }
            "-h" | "--help" => return Err(CliError::Usage),
            option if option.starts_with("--") => {
                return Err(CliError::UnknownOption(option.to_string()));
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(CliError::Usage),
        }
    }

    match (eval, path) {
        (true, Some(_)) => Err(CliError::EvalWithRequest),
        (true, None) => Ok(Command::Eval),
        (false, Some(path)) => Ok(Command::Split {
            path,
            format: format.unwrap_or_default(),
            infer_tags,
        }),
        (false, None) => Err(CliError::Usage),
    }
}
