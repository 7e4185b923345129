use thiserror::Error;

use crate::node::Key;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The key is already present; the tree was left untouched.
    #[error("key {0} already exists in the tree")]
    DuplicateKey(Key),

    #[error("cannot build a tree from an empty key sequence")]
    EmptySequence,

    #[error("invalid key {token:?} in serialized tree")]
    InvalidKey { token: String },
}

pub type Result<T> = std::result::Result<T, TreeError>;
