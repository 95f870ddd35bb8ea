//! The authoritative economy manager.
//!
//! One `CargoEconomy` instance lives at the server's composition root and is
//! the only writer of economy state. Clients see read-only projections via
//! the drained event queue; every mutator is a silent no-op without server
//! authority.

use stationcargo_logic::catalog::{total_price, CargoOrder, CargoOrderCategory, SupplyCatalog};
use stationcargo_logic::exports::{format_settlement, ExportLedger};
use stationcargo_logic::shuttle::{
    plan_arrival, plan_call, tick_timer, MovementRequest, ShuttleStatus,
};

use crate::events::{EconomyEvent, EventQueue};
use crate::hooks::{ItemWorld, OrderSpawner, ShuttleMover};
use crate::persistence::{self, CargoSave, SaveError};
use crate::settings::CargoSettings;

/// Shuttle trade economy: order ledger, dispatch state machine, and export
/// settlement, mutated only on the authoritative server loop.
pub struct CargoEconomy {
    credits: i64,
    status: ShuttleStatus,
    fly_time: f32,
    /// Message shown in the station status tab. Resets when the shuttle is
    /// sent out to Central Command.
    dispatch_log: String,
    catalog: SupplyCatalog,
    current_category: Option<usize>,
    cart: Vec<CargoOrder>,
    confirmed_orders: Vec<CargoOrder>,
    exports: ExportLedger,
    events: EventQueue,
    settings: CargoSettings,
    server: bool,
}

impl CargoEconomy {
    /// Build the economy at the composition root. `server` grants mutation
    /// authority; client-side instances only ever read.
    pub fn new(catalog: SupplyCatalog, settings: CargoSettings, server: bool) -> Self {
        Self {
            credits: settings.starting_credits,
            status: ShuttleStatus::DockedStation,
            fly_time: 0.0,
            dispatch_log: String::new(),
            catalog,
            current_category: None,
            cart: Vec::new(),
            confirmed_orders: Vec::new(),
            exports: ExportLedger::new(),
            events: EventQueue::new(),
            settings,
            server,
        }
    }

    fn is_authoritative(&self) -> bool {
        self.server
    }

    // ── Order/cart ledger ───────────────────────────────────────────────

    /// Append an order to the cart. Server only.
    pub fn add_to_cart(&mut self, order: CargoOrder) {
        if !self.is_authoritative() {
            return;
        }
        self.cart.push(order);
        self.events.push(EconomyEvent::CartChanged);
    }

    /// Remove the first matching entry from the cart, if any. Server only.
    pub fn remove_from_cart(&mut self, order: &CargoOrder) {
        if !self.is_authoritative() {
            return;
        }
        if let Some(pos) = self.cart.iter().position(|o| o == order) {
            self.cart.remove(pos);
        }
        self.events.push(EconomyEvent::CartChanged);
    }

    /// Set the currently displayed catalog category. Server only.
    pub fn open_category(&mut self, index: usize) {
        if !self.is_authoritative() {
            return;
        }
        if index >= self.catalog.categories.len() {
            return;
        }
        self.current_category = Some(index);
        self.events.push(EconomyEvent::CategoryChanged);
    }

    /// Sum of credit costs over the cart. Pure, no side effects.
    pub fn total_cart_price(&self) -> i64 {
        total_price(&self.cart)
    }

    /// Atomic checkout: the whole cart moves to confirmed orders and the
    /// account is debited by exactly the cart total, or — when the total
    /// exceeds the balance — nothing changes at all. Both outcomes emit
    /// credits and cart notifications so observers can re-render a
    /// rejection. Server only.
    pub fn confirm_cart(&mut self) {
        if !self.is_authoritative() {
            return;
        }
        let total = self.total_cart_price();
        if total <= self.credits {
            self.confirmed_orders.append(&mut self.cart);
            self.credits -= total;
            log::info!(
                "cart confirmed for {} credits, {} remaining",
                total,
                self.credits
            );
        }
        self.events.push(EconomyEvent::CreditsChanged);
        self.events.push(EconomyEvent::CartChanged);
    }

    // ── Shuttle dispatch ────────────────────────────────────────────────

    /// Call the shuttle. A no-op while the countdown is running or the
    /// shuttle is mid-flight. Server only.
    pub fn call_shuttle(&mut self, mover: &mut dyn ShuttleMover, spawner: &mut dyn OrderSpawner) {
        if !self.is_authoritative() {
            return;
        }
        if self.fly_time > 0.0 {
            return;
        }

        if let Some(plan) = plan_call(self.status, self.fly_time) {
            self.fly_time = self.settings.shuttle_fly_duration;

            if plan.delivers_orders {
                self.deliver_orders(spawner);
                self.dispatch_log.push_str("Shuttle is sent back with goods.\n");
            }
            if plan.begins_outbound {
                self.dispatch_log.clear();
                self.exports.clear();
            }
            match plan.movement {
                Some(MovementRequest::ToCentcom) => mover.move_to_centcom(),
                Some(MovementRequest::ToStation) => mover.move_to_station(),
                None => {}
            }

            log::info!(
                "shuttle called: {:?} -> {:?}, countdown {}s",
                self.status,
                plan.next_status,
                self.fly_time
            );
            self.status = plan.next_status;
        }

        self.events.push(EconomyEvent::ShuttleChanged);
    }

    /// One fixed one-second countdown step, scheduled by the externally
    /// owned game loop once per real second. When the return-leg countdown
    /// reaches zero the physical move home is requested; docking itself
    /// waits for the mover's arrival notice. Server only.
    pub fn tick(&mut self, mover: &mut dyn ShuttleMover) {
        if !self.is_authoritative() {
            return;
        }
        if self.fly_time <= 0.0 {
            return;
        }
        self.fly_time = tick_timer(self.fly_time);
        self.events.push(EconomyEvent::TimerChanged);

        if self.fly_time == 0.0 && self.status == ShuttleStatus::OnRouteStation {
            mover.move_to_station();
        }
    }

    /// Arrival notice from the physical mover. Strict about the current
    /// status: an arrival while already docked changes nothing. Docking at
    /// Central Command flushes the export ledger into the dispatch log.
    /// Server only.
    pub fn on_shuttle_arrival(&mut self) {
        if !self.is_authoritative() {
            return;
        }

        if let Some(next) = plan_arrival(self.status) {
            if next == ShuttleStatus::DockedCentcom {
                let summary = format_settlement(&self.exports);
                self.dispatch_log.push_str(&summary);
                log::info!(
                    "shuttle docked at centcom, {} export line(s) settled",
                    self.exports.len()
                );
            } else {
                log::info!("shuttle docked at station");
            }
            self.status = next;
        }

        self.events.push(EconomyEvent::ShuttleChanged);
    }

    /// Best-effort delivery: orders that fail to spawn stay queued for the
    /// next trip.
    fn deliver_orders(&mut self, spawner: &mut dyn OrderSpawner) {
        spawner.prepare_delivery();
        let mut i = 0;
        while i < self.confirmed_orders.len() {
            if spawner.spawn_order(&self.confirmed_orders[i]) {
                self.confirmed_orders.remove(i);
            } else {
                log::warn!(
                    "could not spawn order {:?}, keeping it for the next trip",
                    self.confirmed_orders[i].order_name
                );
                i += 1;
            }
        }
    }

    // ── Export settlement ───────────────────────────────────────────────

    /// Sell one item: appraise it, and — if it carries a bounty — credit
    /// the account, tally it in the export ledger, and remove it from the
    /// world. Items without a bounty are left untouched. Server only.
    pub fn record_export<W: ItemWorld>(&mut self, world: &mut W, item: W::Item) {
        if !self.is_authoritative() {
            return;
        }
        let appraisal = world.appraise(&item);
        let value = match self.exports.record(&appraisal) {
            Some(v) => v,
            None => return,
        };

        self.credits += value;
        self.events.push(EconomyEvent::CreditsChanged);

        world.deregister(&item);
        world.destroy(item);
    }

    // ── Read-only projections ───────────────────────────────────────────

    pub fn credits(&self) -> i64 {
        self.credits
    }

    pub fn status(&self) -> ShuttleStatus {
        self.status
    }

    pub fn fly_time(&self) -> f32 {
        self.fly_time
    }

    pub fn dispatch_log(&self) -> &str {
        &self.dispatch_log
    }

    pub fn catalog(&self) -> &SupplyCatalog {
        &self.catalog
    }

    pub fn current_category(&self) -> Option<&CargoOrderCategory> {
        self.current_category
            .and_then(|i| self.catalog.categories.get(i))
    }

    pub fn cart(&self) -> &[CargoOrder] {
        &self.cart
    }

    pub fn confirmed_orders(&self) -> &[CargoOrder] {
        &self.confirmed_orders
    }

    pub fn exports(&self) -> &ExportLedger {
        &self.exports
    }

    /// Take all pending change notifications, for the replication layer.
    pub fn drain_events(&mut self) -> Vec<EconomyEvent> {
        self.events.drain()
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Snapshot the economy state to a writer.
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_economy(writer, &self.snapshot())
    }

    /// Restore economy state from a reader. Catalog, settings, and the
    /// authority flag stay as constructed; queued events are dropped.
    pub fn restore<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let save = persistence::load_economy(reader)?;
        let status = ShuttleStatus::from_u8(save.status).ok_or(SaveError::BadStatus(save.status))?;

        self.credits = save.credits;
        self.status = status;
        self.fly_time = save.fly_time;
        self.dispatch_log = save.dispatch_log;
        self.current_category = save.current_category;
        self.cart = save.cart;
        self.confirmed_orders = save.confirmed_orders;
        self.exports = save.exports;
        self.events = EventQueue::new();
        Ok(())
    }

    fn snapshot(&self) -> CargoSave {
        CargoSave {
            version: persistence::SAVE_VERSION,
            credits: self.credits,
            status: self.status as u8,
            fly_time: self.fly_time,
            dispatch_log: self.dispatch_log.clone(),
            current_category: self.current_category,
            cart: self.cart.clone(),
            confirmed_orders: self.confirmed_orders.clone(),
            exports: self.exports.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullMover;
    impl ShuttleMover for NullMover {
        fn move_to_centcom(&mut self) {}
        fn move_to_station(&mut self) {}
    }

    struct NullSpawner;
    impl OrderSpawner for NullSpawner {
        fn prepare_delivery(&mut self) {}
        fn spawn_order(&mut self, _order: &CargoOrder) -> bool {
            true
        }
    }

    fn order(name: &str, cost: i64) -> CargoOrder {
        CargoOrder {
            order_name: name.to_string(),
            credits_cost: cost,
            crate_id: "crate_basic".to_string(),
            items: vec![],
        }
    }

    fn catalog() -> SupplyCatalog {
        SupplyCatalog {
            categories: vec![CargoOrderCategory {
                category_name: "Food".to_string(),
                supplies: vec![order("Rations", 400)],
            }],
        }
    }

    fn server_economy() -> CargoEconomy {
        CargoEconomy::new(catalog(), CargoSettings::default(), true)
    }

    #[test]
    fn test_checkout_affordable() {
        let mut economy = server_economy();
        economy.add_to_cart(order("a", 400));
        economy.add_to_cart(order("b", 300));
        economy.drain_events();

        economy.confirm_cart();

        assert_eq!(economy.credits(), 300);
        assert!(economy.cart().is_empty());
        assert_eq!(economy.confirmed_orders().len(), 2);
        assert_eq!(
            economy.drain_events(),
            vec![EconomyEvent::CreditsChanged, EconomyEvent::CartChanged]
        );
    }

    #[test]
    fn test_checkout_rejection_changes_nothing_but_still_notifies() {
        let mut economy = server_economy();
        economy.add_to_cart(order("pricey", 1200));
        economy.drain_events();

        economy.confirm_cart();

        assert_eq!(economy.credits(), 1000);
        assert_eq!(economy.cart().len(), 1);
        assert!(economy.confirmed_orders().is_empty());
        // Rejection still fires both notifications.
        assert_eq!(
            economy.drain_events(),
            vec![EconomyEvent::CreditsChanged, EconomyEvent::CartChanged]
        );
    }

    #[test]
    fn test_checkout_never_partial() {
        let mut economy = server_economy();
        economy.add_to_cart(order("a", 900));
        economy.add_to_cart(order("b", 900));

        economy.confirm_cart();

        // 1800 > 1000: neither order commits.
        assert_eq!(economy.credits(), 1000);
        assert_eq!(economy.cart().len(), 2);
        assert!(economy.confirmed_orders().is_empty());
    }

    #[test]
    fn test_remove_from_cart_first_match_only() {
        let mut economy = server_economy();
        economy.add_to_cart(order("a", 100));
        economy.add_to_cart(order("a", 100));
        economy.remove_from_cart(&order("a", 100));
        assert_eq!(economy.cart().len(), 1);
    }

    #[test]
    fn test_client_instance_never_mutates() {
        let mut economy = CargoEconomy::new(catalog(), CargoSettings::default(), false);
        economy.add_to_cart(order("a", 100));
        economy.confirm_cart();
        economy.open_category(0);
        economy.call_shuttle(&mut NullMover, &mut NullSpawner);
        economy.on_shuttle_arrival();
        economy.tick(&mut NullMover);

        assert!(economy.cart().is_empty());
        assert_eq!(economy.credits(), 1000);
        assert_eq!(economy.status(), ShuttleStatus::DockedStation);
        assert!(economy.drain_events().is_empty());
    }

    #[test]
    fn test_open_category() {
        let mut economy = server_economy();
        economy.open_category(0);
        assert_eq!(
            economy.current_category().map(|c| c.category_name.as_str()),
            Some("Food")
        );
        assert_eq!(economy.drain_events(), vec![EconomyEvent::CategoryChanged]);

        economy.open_category(7);
        assert_eq!(
            economy.current_category().map(|c| c.category_name.as_str()),
            Some("Food")
        );
        assert!(economy.drain_events().is_empty());
    }

    #[test]
    fn test_call_starts_countdown_and_clears_exports() {
        let mut economy = server_economy();
        economy.call_shuttle(&mut NullMover, &mut NullSpawner);
        assert_eq!(economy.status(), ShuttleStatus::OnRouteCentcom);
        assert_eq!(economy.fly_time(), 10.0);
        assert!(economy.exports().is_empty());
        assert_eq!(economy.dispatch_log(), "");
    }

    #[test]
    fn test_call_refused_while_countdown_running() {
        let mut economy = server_economy();
        economy.call_shuttle(&mut NullMover, &mut NullSpawner);
        economy.drain_events();

        economy.call_shuttle(&mut NullMover, &mut NullSpawner);

        assert_eq!(economy.status(), ShuttleStatus::OnRouteCentcom);
        assert_eq!(economy.fly_time(), 10.0);
        // Refused before the guard: not even a shuttle notification.
        assert!(economy.drain_events().is_empty());
    }

    #[test]
    fn test_tick_counts_down_once_per_call() {
        let mut economy = server_economy();
        economy.call_shuttle(&mut NullMover, &mut NullSpawner);
        economy.tick(&mut NullMover);
        assert_eq!(economy.fly_time(), 9.0);
        economy.drain_events();

        for _ in 0..20 {
            economy.tick(&mut NullMover);
        }
        assert_eq!(economy.fly_time(), 0.0);
        // Nine remaining decrements notify; ticks at zero do not.
        assert_eq!(
            economy.drain_events(),
            vec![EconomyEvent::TimerChanged; 9]
        );
    }

    #[test]
    fn test_save_restore_roundtrip() {
        let mut economy = server_economy();
        economy.add_to_cart(order("a", 400));
        economy.confirm_cart();
        economy.call_shuttle(&mut NullMover, &mut NullSpawner);
        economy.tick(&mut NullMover);

        let mut buffer = Vec::new();
        economy.save(&mut buffer).unwrap();

        let mut restored = server_economy();
        restored.restore(buffer.as_slice()).unwrap();

        assert_eq!(restored.credits(), economy.credits());
        assert_eq!(restored.status(), economy.status());
        assert_eq!(restored.fly_time(), economy.fly_time());
        assert_eq!(restored.confirmed_orders(), economy.confirmed_orders());
        assert!(restored.drain_events().is_empty());
    }
}
