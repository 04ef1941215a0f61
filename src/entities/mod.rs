//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod base_config;
pub mod tariff_overrides;

// Re-export specific types to avoid conflicts
pub use base_config::{Column as BaseConfigColumn, Entity as BaseConfig, Model as BaseConfigModel};
pub use tariff_overrides::{
    Column as TariffOverridesColumn, Entity as TariffOverrides, Model as TariffOverridesModel,
};
