// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_repository;
pub mod json_mapper;
pub mod observations;
