pub mod check;
pub mod event;
pub mod linear;

mod display;
mod error;
mod node;
mod tree;

pub use error::{Result, TreeError};
pub use event::{Direction, LogObserver, RotationCase, TreeEvent, TreeObserver};
pub use linear::{decode, deserialize, deserialize_with, encode, serialize};
pub use node::{Key, NodeRef, Side};
pub use tree::AvlTree;
