//! External collaborator seams.
//!
//! The economy manager never touches the world directly: physical shuttle
//! movement, crate spawning, and item despawning all go through these traits,
//! injected by the composition root. None of the implementations may
//! re-enter the manager.

use stationcargo_logic::catalog::CargoOrder;
use stationcargo_logic::exports::ItemAppraisal;

/// Physical shuttle mover. Calls back into
/// [`CargoEconomy::on_shuttle_arrival`](crate::CargoEconomy::on_shuttle_arrival)
/// once the shuttle reaches its destination.
pub trait ShuttleMover {
    fn move_to_centcom(&mut self);
    fn move_to_station(&mut self);
}

/// Spawn service materializing paid orders onto the shuttle.
pub trait OrderSpawner {
    /// Called once before a batch of [`spawn_order`](Self::spawn_order)
    /// calls, so the service can stage spawn positions.
    fn prepare_delivery(&mut self);

    /// Materialize one order. `false` means the order could not be placed
    /// (no free tile, say) and stays queued for the next trip.
    fn spawn_order(&mut self, order: &CargoOrder) -> bool;
}

/// Pricing oracle, item metadata reader, and despawn service in one seam.
pub trait ItemWorld {
    /// Handle to a world item.
    type Item;

    /// Report sale value and export metadata for the item. A zero or
    /// negative `sell_price` marks it as not sellable.
    fn appraise(&self, item: &Self::Item) -> ItemAppraisal;

    /// Remove the item from spatial tracking.
    fn deregister(&mut self, item: &Self::Item);

    /// Destroy the item for good.
    fn destroy(&mut self, item: Self::Item);
}
