//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod profiles;
pub mod profiles_dto;
pub mod schemas;
pub mod state;
mod validation;

pub use error::ApiResult;
