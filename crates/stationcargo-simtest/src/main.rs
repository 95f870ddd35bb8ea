//! StationCargo Headless Trade Harness
//!
//! Validates the trade economy logic and catalog data without an engine.
//! Runs entirely in-process — no networking, no rendering, no game loop.
//!
//! Usage:
//!   cargo run -p stationcargo-simtest
//!   cargo run -p stationcargo-simtest -- --verbose

use stationcargo_core::settings::load_catalog;
use stationcargo_core::{
    CargoEconomy, CargoSettings, ItemWorld, OrderSpawner, ShuttleMover,
};
use stationcargo_logic::catalog::{total_price, CargoOrder, SupplyCatalog};
use stationcargo_logic::exports::{format_settlement, ExportLedger, ItemAppraisal};
use stationcargo_logic::shuttle::ShuttleStatus;

use serde::Deserialize;

// ── Catalog data (same JSON the server loads) ───────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/supply_catalog.json");

/// Raw catalog shape, parsed independently of the logic types so a field
/// rename in either place shows up here.
#[derive(Debug, Deserialize)]
struct RawCategory {
    category_name: String,
    supplies: Vec<RawOrder>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawOrder {
    order_name: String,
    credits_cost: i64,
    crate_id: String,
    items: Vec<String>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(results: &mut Vec<TestResult>, name: &str, passed: bool, detail: String) {
    results.push(TestResult {
        name: name.to_string(),
        passed,
        detail,
    });
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== StationCargo Trade Harness ===\n");

    let mut results = Vec::new();

    // 1. Supply catalog data validation
    results.extend(validate_catalog_data());

    // 2. Cart and checkout sweep
    results.extend(validate_checkout());

    // 3. Full scripted shuttle trade cycle
    results.extend(validate_trade_cycle());

    // 4. Settlement message formatting
    results.extend(validate_settlement_format());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Shared mocks ────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingMover {
    moves: Vec<&'static str>,
}

impl ShuttleMover for RecordingMover {
    fn move_to_centcom(&mut self) {
        self.moves.push("centcom");
    }
    fn move_to_station(&mut self) {
        self.moves.push("station");
    }
}

#[derive(Default)]
struct CountingSpawner {
    spawned: Vec<String>,
}

impl OrderSpawner for CountingSpawner {
    fn prepare_delivery(&mut self) {}
    fn spawn_order(&mut self, order: &CargoOrder) -> bool {
        self.spawned.push(order.order_name.clone());
        true
    }
}

struct FixedWorld {
    appraisal: ItemAppraisal,
    destroyed: u32,
}

impl ItemWorld for FixedWorld {
    type Item = ();

    fn appraise(&self, _item: &()) -> ItemAppraisal {
        self.appraisal.clone()
    }
    fn deregister(&mut self, _item: &()) {}
    fn destroy(&mut self, _item: ()) {
        self.destroyed += 1;
    }
}

fn loaded_catalog() -> SupplyCatalog {
    match load_catalog(CATALOG_JSON) {
        Ok(c) => c,
        Err(_) => SupplyCatalog::default(),
    }
}

// ── 1. Supply catalog ───────────────────────────────────────────────────

fn validate_catalog_data() -> Vec<TestResult> {
    println!("--- Supply Catalog ---");
    let mut results = Vec::new();

    match serde_json::from_str::<Vec<RawCategory>>(CATALOG_JSON) {
        Ok(raw) => check(
            &mut results,
            "catalog_shape",
            raw.iter()
                .all(|c| !c.category_name.is_empty() && !c.supplies.is_empty()),
            format!("{} raw categories", raw.len()),
        ),
        Err(e) => check(
            &mut results,
            "catalog_shape",
            false,
            format!("JSON parse error: {}", e),
        ),
    }

    let catalog = match load_catalog(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            check(
                &mut results,
                "catalog_load",
                false,
                format!("load failed: {}", e),
            );
            return results;
        }
    };

    check(
        &mut results,
        "catalog_load",
        true,
        format!(
            "{} categories, {} orders",
            catalog.categories.len(),
            catalog.order_count()
        ),
    );

    check(
        &mut results,
        "catalog_has_categories",
        catalog.categories.len() >= 2,
        format!("{} categories", catalog.categories.len()),
    );

    let all_priced = catalog
        .categories
        .iter()
        .flat_map(|c| c.supplies.iter())
        .all(|o| o.credits_cost > 0);
    check(
        &mut results,
        "all_orders_priced",
        all_priced,
        "every order costs at least 1 credit".to_string(),
    );

    let all_have_items = catalog
        .categories
        .iter()
        .flat_map(|c| c.supplies.iter())
        .all(|o| !o.items.is_empty() && !o.crate_id.is_empty());
    check(
        &mut results,
        "all_orders_stocked",
        all_have_items,
        "every order has a crate id and contents".to_string(),
    );

    results
}

// ── 2. Cart and checkout ────────────────────────────────────────────────

fn validate_checkout() -> Vec<TestResult> {
    println!("--- Cart & Checkout ---");
    let mut results = Vec::new();
    let catalog = loaded_catalog();

    // Affordable cart commits in full.
    let mut economy = CargoEconomy::new(catalog.clone(), CargoSettings::default(), true);
    let rations = catalog.find_order("Emergency Rations").cloned();
    let sheets = catalog.find_order("Metal Sheets").cloned();
    if let (Some(rations), Some(sheets)) = (rations, sheets) {
        let expected = total_price(&[rations.clone(), sheets.clone()]);
        economy.add_to_cart(rations);
        economy.add_to_cart(sheets);
        economy.confirm_cart();
        check(
            &mut results,
            "affordable_cart_commits",
            economy.credits() == 1000 - expected
                && economy.cart().is_empty()
                && economy.confirmed_orders().len() == 2,
            format!("balance {} after {} spent", economy.credits(), expected),
        );
    } else {
        check(
            &mut results,
            "affordable_cart_commits",
            false,
            "expected catalog orders missing".to_string(),
        );
    }

    // Unaffordable cart is rejected atomically.
    let mut economy = CargoEconomy::new(catalog.clone(), CargoSettings::default(), true);
    if let Some(beer) = catalog.find_order("Crate with beer and steak") {
        economy.add_to_cart(beer.clone());
        economy.add_to_cart(beer.clone());
        economy.confirm_cart();
        check(
            &mut results,
            "unaffordable_cart_rejected",
            economy.credits() == 1000 && economy.cart().len() == 2,
            format!(
                "balance {} with {} cart entries kept",
                economy.credits(),
                economy.cart().len()
            ),
        );
    }

    // Empty cart checkout is a harmless zero-debit.
    let mut economy = CargoEconomy::new(catalog, CargoSettings::default(), true);
    economy.confirm_cart();
    check(
        &mut results,
        "empty_cart_checkout",
        economy.credits() == 1000 && economy.confirmed_orders().is_empty(),
        format!("balance {}", economy.credits()),
    );

    results
}

// ── 3. Trade cycle ──────────────────────────────────────────────────────

fn validate_trade_cycle() -> Vec<TestResult> {
    println!("--- Shuttle Trade Cycle ---");
    let mut results = Vec::new();
    let catalog = loaded_catalog();

    let mut economy = CargoEconomy::new(catalog.clone(), CargoSettings::default(), true);
    let mut mover = RecordingMover::default();
    let mut spawner = CountingSpawner::default();

    if let Some(rations) = catalog.find_order("Emergency Rations") {
        economy.add_to_cart(rations.clone());
    }
    economy.confirm_cart();

    economy.call_shuttle(&mut mover, &mut spawner);
    check(
        &mut results,
        "outbound_call",
        economy.status() == ShuttleStatus::OnRouteCentcom
            && economy.fly_time() == 10.0
            && mover.moves == vec!["centcom"],
        format!("status {:?}, timer {}", economy.status(), economy.fly_time()),
    );

    // Sell a stack of gold mid-flight.
    let mut world = FixedWorld {
        appraisal: ItemAppraisal {
            sell_price: 500,
            export_name: Some("Gold Bar".to_string()),
            export_message: None,
            display_name: "ingot".to_string(),
            stack_count: 3,
        },
        destroyed: 0,
    };
    let credits_before = economy.credits();
    economy.record_export(&mut world, ());
    check(
        &mut results,
        "export_credits_account",
        economy.credits() == credits_before + 500 && world.destroyed == 1,
        format!("balance {}", economy.credits()),
    );

    while economy.fly_time() > 0.0 {
        economy.tick(&mut mover);
    }
    economy.on_shuttle_arrival();
    check(
        &mut results,
        "settlement_on_docking",
        economy.status() == ShuttleStatus::DockedCentcom
            && economy.dispatch_log() == "+500 credits: 3Gold Bars\n",
        format!("log {:?}", economy.dispatch_log()),
    );

    economy.call_shuttle(&mut mover, &mut spawner);
    check(
        &mut results,
        "return_delivers_orders",
        economy.status() == ShuttleStatus::OnRouteStation
            && spawner.spawned == vec!["Emergency Rations"]
            && economy.confirmed_orders().is_empty(),
        format!("{} order(s) spawned", spawner.spawned.len()),
    );

    while economy.fly_time() > 0.0 {
        economy.tick(&mut mover);
    }
    check(
        &mut results,
        "return_leg_moves_on_timer",
        mover.moves == vec!["centcom", "station"],
        format!("moves {:?}", mover.moves),
    );

    economy.on_shuttle_arrival();
    check(
        &mut results,
        "cycle_ends_docked_at_station",
        economy.status() == ShuttleStatus::DockedStation,
        format!("status {:?}", economy.status()),
    );

    economy.call_shuttle(&mut mover, &mut spawner);
    check(
        &mut results,
        "next_trip_clean_slate",
        economy.exports().is_empty() && economy.dispatch_log().is_empty(),
        "export ledger and dispatch log cleared".to_string(),
    );

    results
}

// ── 4. Settlement formatting ────────────────────────────────────────────

fn validate_settlement_format() -> Vec<TestResult> {
    println!("--- Settlement Formatting ---");
    let mut results = Vec::new();

    let appraise = |price, name: Option<&str>, message: Option<&str>, display: &str, stack| {
        ItemAppraisal {
            sell_price: price,
            export_name: name.map(String::from),
            export_message: message.map(String::from),
            display_name: display.to_string(),
            stack_count: stack,
        }
    };

    let mut ledger = ExportLedger::new();
    ledger.record(&appraise(50, None, None, "ore", 1));
    check(
        &mut results,
        "plain_single",
        format_settlement(&ledger) == "+50 credits: 1ore\n",
        format!("{:?}", format_settlement(&ledger)),
    );

    let mut ledger = ExportLedger::new();
    ledger.record(&appraise(500, Some("Gold Bar"), None, "ingot", 3));
    check(
        &mut results,
        "plural_override_name",
        format_settlement(&ledger) == "+500 credits: 3Gold Bars\n",
        format!("{:?}", format_settlement(&ledger)),
    );

    let mut ledger = ExportLedger::new();
    ledger.record(&appraise(200, None, Some("of anomalous material"), "rock", 2));
    check(
        &mut results,
        "message_suppresses_key",
        format_settlement(&ledger) == "+200 credits: 2 of anomalous material\n",
        format!("{:?}", format_settlement(&ledger)),
    );

    let mut ledger = ExportLedger::new();
    ledger.record(&appraise(200, Some("Artifact"), Some("(sealed)"), "rock", 1));
    check(
        &mut results,
        "name_and_message",
        format_settlement(&ledger) == "+200 credits: 1Artifact (sealed)\n",
        format!("{:?}", format_settlement(&ledger)),
    );

    let mut ledger = ExportLedger::new();
    check(
        &mut results,
        "worthless_not_recorded",
        ledger.record(&appraise(0, None, None, "trash", 1)).is_none() && ledger.is_empty(),
        "zero-value item rejected".to_string(),
    );

    results
}
