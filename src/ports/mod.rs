//! Ports (trait boundaries) between the trainer and its collaborators.

pub mod observer;

pub use observer::Observer;
