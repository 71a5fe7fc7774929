//! CLI infrastructure for the self-play trainer
//!
//! This module provides the command-line interface for training a value
//! table, inspecting what it learned, and playing against it.

pub mod commands;
pub mod config;
pub mod output;
