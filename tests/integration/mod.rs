//! Integration tests module
//!
//! This module organizes all integration tests for kodi-controller.

pub mod commands_test;
pub mod config_test;
