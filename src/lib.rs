pub mod api;
pub mod config;
pub mod server;
pub mod store;
pub mod strict;
pub mod telemetry;

pub use config::Config;
pub use store::{NewPet, Pet, PetFilter, PetId, PetStore, StoreError};
