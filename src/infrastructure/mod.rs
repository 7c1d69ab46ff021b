pub mod activity_repository;
pub mod database;
pub mod seed_data;
