//! Network layer: adapter discovery, association and address inspection.
//!
//! This module provides types and traits for:
//! - Identifying test hardware ([`AdapterIdentity`])
//! - Running host commands with timeouts ([`CommandRunner`])
//! - Finding attached adapters ([`AdapterDiscovery`])
//! - Associating an adapter with the test network ([`NetworkConnector`])
//! - Checking IPv4 assignment and hardware addresses ([`AddressInspector`])
//! - Platform-specific implementations ([`platform`])

mod command;
mod connector;
mod discovery;
mod identity;
mod inspect;
pub mod platform;

pub use command::{CommandError, CommandLine, CommandOutput, CommandRunner, SystemRunner};
pub use connector::{ConnectError, ConnectFailureKind, ConnectStep, NetworkConnector};
pub use discovery::{AdapterDiscovery, DiscoveryError};
pub use identity::{AdapterIdentity, Credentials, InterfaceHandle};
pub use inspect::{AddressInspector, UNKNOWN_MAC, format_mac, random_mac};
