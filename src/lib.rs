pub mod collections;
pub mod config;
pub mod file_svc;
pub mod hash_svc;
pub mod runner;
pub mod status_svc;
pub mod study;
pub mod summary;
pub mod time_provider;
pub mod transfer_service;
