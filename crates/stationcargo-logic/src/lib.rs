//! Pure cargo trade logic for StationCargo.
//!
//! This crate contains all trade-economy logic that is independent of any
//! engine, database, or runtime. Functions take plain data and return
//! results, making them unit-testable and portable between the authoritative
//! server loop, headless harnesses, and any future host.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Supply catalog data model, JSON loading, cart pricing |
//! | [`shuttle`] | Shuttle status state machine and flight timer math |
//! | [`exports`] | Export ledger accumulation and settlement formatting |

pub mod catalog;
pub mod exports;
pub mod shuttle;
