//! Authoritative shuttle trade economy manager.
//!
//! Owns the five economy structures — account balance, cart, confirmed
//! orders, shuttle dispatch state, export ledger — and mutates them only on
//! the server's logical thread. The surrounding game loop drives the
//! countdown via [`CargoEconomy::tick`] once per real second; physical
//! collaborators (shuttle mover, spawn service, item world) are injected as
//! traits, and observers consume drained [`events::EconomyEvent`]s rather
//! than holding references to live state.

pub mod economy;
pub mod events;
pub mod hooks;
pub mod persistence;
pub mod settings;

pub use economy::CargoEconomy;
pub use events::EconomyEvent;
pub use hooks::{ItemWorld, OrderSpawner, ShuttleMover};
pub use settings::CargoSettings;
