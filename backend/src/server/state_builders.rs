//! Builders for HTTP state backed by the database or by fixtures.

use std::sync::Arc;

use actix_web::web;

use profile_service::domain::ProfileService;
use profile_service::domain::ports::{ProfileCommand, ProfileQuery};
use profile_service::inbound::http::state::HttpState;
use profile_service::outbound::persistence::{DbPool, DieselProfileRepository};

use super::ServerConfig;

fn profile_ports(pool: &DbPool) -> (Arc<dyn ProfileCommand>, Arc<dyn ProfileQuery>) {
    let service = Arc::new(ProfileService::new(Arc::new(DieselProfileRepository::new(
        pool.clone(),
    ))));
    (service.clone(), service)
}

/// Build the HTTP state, using the Diesel repository when a pool is
/// configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let (profiles, profiles_query) = profile_ports(pool);
            HttpState::new(profiles, profiles_query)
        }
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}
