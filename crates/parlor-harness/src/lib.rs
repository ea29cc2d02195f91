//! Test harness for the parlor coordination core.
//!
//! Recording fakes for the injected collaborators ([`FakeHost`],
//! [`FakeCallUrlClient`]), room fixtures in the host wire shape, and a
//! seeded randomized scenario driver that interleaves room operations with
//! their completions against a real dispatcher/store pair while checking
//! invariants after every step.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fake_client;
mod fake_host;
mod fixtures;
mod scenario;

pub use fake_client::FakeCallUrlClient;
pub use fake_host::{FakeHost, HostCall};
pub use fixtures::{room_fixture, rooms_from_json};
pub use scenario::{InvariantViolation, Scenario, ScenarioReport};
