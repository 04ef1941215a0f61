/// Database configuration and connection management
pub mod database;

/// Initial tariff configuration loading from config.toml
pub mod tariffs;
