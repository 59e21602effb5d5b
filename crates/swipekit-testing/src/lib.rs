//! Testing utilities and harness for swipekit

pub mod element;
pub mod robot;
pub mod robot_assertions;
pub mod testing;

pub use element::{ElementChange, Journal, JournalEntry, RecordingCallback, SwipeRecord, TestElement};
pub use robot::SwipeRobot;
pub use robot_assertions::{assert_approx_eq, assert_at_rest};
pub use testing::*;

pub mod prelude {
    pub use crate::element::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::robot_assertions::{assert_approx_eq, assert_at_rest};
    pub use crate::testing::*;
}
