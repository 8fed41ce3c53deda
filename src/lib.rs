//! wifi-tester: USB Wi-Fi adapter test engine
//!
//! A library for discovering USB Wi-Fi adapters of a known hardware identity,
//! connecting each one to a test network, verifying that it received an IPv4
//! address, and recording PASS/FAIL results to a report file.

pub mod config;
pub mod engine;
pub mod network;
pub mod report;
pub mod time;
