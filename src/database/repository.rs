pub mod activities_repository;
pub mod companies_repository;
pub mod games_repository;
pub mod reviews_repository;
pub mod settings_repository;
pub mod stats_repository;
pub mod tags_repository;
pub mod users_repository;
