// Application layer - Use cases over the domain
pub mod dashboard_service;
pub mod dataset_repository;
pub mod generation_service;
