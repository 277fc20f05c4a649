// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod export;
pub mod places_client;
pub mod prospect_service;

pub use export::*;
pub use places_client::*;
pub use prospect_service::*;
