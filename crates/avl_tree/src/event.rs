use std::fmt;

use crate::node::{Key, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Shape of an imbalance found while unwinding the insertion path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationCase {
    /// Left-heavy node with a left-leaning (or even) left child: one right rotation.
    LeftLeft,
    /// Left-heavy node with a right-heavy left child: left then right rotation.
    LeftRight,
    /// Right-heavy node with a right-leaning (or even) right child: one left rotation.
    RightRight,
    /// Right-heavy node with a left-heavy right child: right then left rotation.
    RightLeft,
}

impl fmt::Display for RotationCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationCase::LeftLeft => "right",
            RotationCase::LeftRight => "left-right",
            RotationCase::RightRight => "left",
            RotationCase::RightLeft => "right-left",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent {
    Created {
        root: Key,
    },
    NodeCreated {
        key: Key,
        parent: Key,
        side: Side,
    },
    DuplicateIgnored {
        key: Key,
    },
    RebalanceTriggered {
        key: Key,
        balance_factor: i32,
        case: RotationCase,
    },
    Rotated {
        pivot: Key,
        promoted: Key,
        direction: Direction,
    },
}

/// Receives structural events emitted by an [`AvlTree`](crate::AvlTree).
pub trait TreeObserver {
    fn on_event(&mut self, event: &TreeEvent);
}

/// Silent observer.
impl TreeObserver for () {
    fn on_event(&mut self, _event: &TreeEvent) {}
}

/// Records every event in order.
impl TreeObserver for Vec<TreeEvent> {
    fn on_event(&mut self, event: &TreeEvent) {
        self.push(event.clone());
    }
}

/// Target of every record written by [`LogObserver`].
pub const LOG_TARGET: &str = "avl_tree";

/// Forwards events to the `log` facade under the [`LOG_TARGET`] target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl TreeObserver for LogObserver {
    fn on_event(&mut self, event: &TreeEvent) {
        match *event {
            TreeEvent::Created { root } => {
                log::info!(target: LOG_TARGET, "Creating AVL tree with origin node {root}.");
            }
            TreeEvent::NodeCreated { key, parent, side } => {
                let side = match side {
                    Side::Left => "Left",
                    Side::Right => "Right",
                };
                log::info!(
                    target: LOG_TARGET,
                    "{side} child node {key} of node {parent} is created."
                );
            }
            TreeEvent::DuplicateIgnored { key } => {
                log::debug!(target: LOG_TARGET, "Node {key} already exists, insert ignored.");
            }
            TreeEvent::RebalanceTriggered {
                key,
                balance_factor,
                case,
            } => {
                log::info!(
                    target: LOG_TARGET,
                    "Node {key} has balance factor {balance_factor} and requires {case} rotation."
                );
            }
            TreeEvent::Rotated {
                pivot, direction, ..
            } => {
                let direction = match direction {
                    Direction::Left => "left",
                    Direction::Right => "right",
                };
                log::info!(target: LOG_TARGET, "Rotated {direction} at node {pivot}.");
            }
        }
    }
}
