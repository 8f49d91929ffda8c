//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureProfileCommand, FixtureProfileQuery, ProfileCommand, ProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
}

impl HttpState {
    /// Construct state from the profile ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use profile_service::domain::ports::{FixtureProfileCommand, FixtureProfileQuery};
    /// use profile_service::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureProfileCommand), Arc::new(FixtureProfileQuery));
    /// let _query = state.profiles_query.clone();
    /// ```
    pub fn new(profiles: Arc<dyn ProfileCommand>, profiles_query: Arc<dyn ProfileQuery>) -> Self {
        Self {
            profiles,
            profiles_query,
        }
    }

    /// State backed by fixtures, used when no database is configured.
    pub fn fixtures() -> Self {
        Self::new(Arc::new(FixtureProfileCommand), Arc::new(FixtureProfileQuery))
    }
}
