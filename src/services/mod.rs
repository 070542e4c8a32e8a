pub mod ad_throttle_service;
pub mod auth_service;
pub mod entitlement_service;
pub mod tracker_store;
