//! Export ledger — items sold for credits while the shuttle is away.
//!
//! While the shuttle is on its outbound trip, anything left aboard with a
//! bounty is appraised, destroyed, and tallied here. When the shuttle docks
//! at Central Command the ledger is flushed into a human-readable settlement
//! summary for the station's status tab.

use serde::{Deserialize, Serialize};

/// What the pricing oracle and item metadata report for one sellable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAppraisal {
    /// Sale value in credits. Zero or negative means "not sellable".
    pub sell_price: i64,
    /// Override export name, shown instead of the display name.
    pub export_name: Option<String>,
    /// Override export message, appended to the settlement line.
    pub export_message: Option<String>,
    /// Ordinary display name of the item.
    pub display_name: String,
    /// Stack quantity for stackable items; 1 otherwise.
    pub stack_count: u32,
}

/// Running tally for one display key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Override message as configured on the item, empty when none.
    pub export_message: String,
    /// Override name as configured on the item, empty when none.
    pub export_name: String,
    pub count: u32,
    pub total_value: i64,
}

/// Insertion-ordered map from display key to running tally.
///
/// Keys preserve case. Keeping insertion order makes settlement summaries
/// come out in sale order, which is what players expect to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLedger {
    entries: Vec<(String, ExportEntry)>,
}

impl ExportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one appraised item. Returns the credited value, or `None`
    /// when the item has no bounty — in that case the ledger is untouched
    /// and the caller must leave the item in the world.
    pub fn record(&mut self, appraisal: &ItemAppraisal) -> Option<i64> {
        if appraisal.sell_price <= 0 {
            return None;
        }

        let key = match &appraisal.export_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => appraisal.display_name.clone(),
        };

        let idx = match self.entries.iter().position(|(k, _)| *k == key) {
            Some(i) => i,
            None => {
                self.entries.push((
                    key,
                    ExportEntry {
                        export_message: appraisal.export_message.clone().unwrap_or_default(),
                        export_name: appraisal.export_name.clone().unwrap_or_default(),
                        count: 0,
                        total_value: 0,
                    },
                ));
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx].1;
        entry.count += appraisal.stack_count.max(1);
        entry.total_value += appraisal.sell_price;
        Some(appraisal.sell_price)
    }

    pub fn get(&self, key: &str) -> Option<&ExportEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Format the settlement summary, one line per ledger entry in sale order.
///
/// Entries with an override message but no override name show only the
/// message after the count — no key, no pluralisation. Everything else shows
/// the key right after the count, an `s` when the count is above one, and
/// the message if there is one.
pub fn format_settlement(ledger: &ExportLedger) -> String {
    let mut message = String::new();
    for (key, entry) in ledger.iter() {
        message.push_str(&format!("+{} credits: {}", entry.total_value, entry.count));
        if !entry.export_message.is_empty() && entry.export_name.is_empty() {
            message.push_str(&format!(" {}", entry.export_message));
        } else {
            message.push_str(key);
            if entry.count > 1 {
                message.push('s');
            }
            if !entry.export_message.is_empty() {
                message.push_str(&format!(" {}", entry.export_message));
            }
        }
        message.push('\n');
    }
    message
}
