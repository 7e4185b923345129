use std::io;
use std::path::PathBuf;

use avl_tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid tree file name {0:?}")]
    InvalidName(String),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read tree from {}: {source}", .path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),

    #[error("logger already installed: {0}")]
    Install(#[from] log::SetLoggerError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing command")]
    MissingCommand,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("missing <{0}> argument")]
    MissingArgument(&'static str),

    #[error("{0:?} is not a valid integer key")]
    InvalidKey(String),

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
