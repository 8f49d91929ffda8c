//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`ProfileQuery`, `ProfileCommand`) are consumed by inbound
//! adapters; the driven port (`ProfileRepository`) is implemented by
//! outbound persistence adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod profile_command;
mod profile_query;
mod profile_repository;

#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{FixtureProfileCommand, ProfileCommand};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{FixtureProfileQuery, ProfileQuery};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
