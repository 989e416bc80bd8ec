//! Configuration unit entries

use hiwire_domain::ports::ConfigurationUnit;

/// Registry entry for a configuration unit
pub struct ConfigurationUnitEntry {
    /// Unit name, used for listings only
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Creates a fresh, unbound unit
    pub factory: fn() -> Box<dyn ConfigurationUnit>,
}

#[linkme::distributed_slice]
pub static CONFIGURATION_UNITS: [ConfigurationUnitEntry] = [..];

/// Instantiate every registered unit, in name order
pub fn registered_units() -> Vec<Box<dyn ConfigurationUnit>> {
    let mut entries: Vec<&ConfigurationUnitEntry> = CONFIGURATION_UNITS.iter().collect();
    entries.sort_by_key(|entry| entry.name);
    entries.into_iter().map(|entry| (entry.factory)()).collect()
}

/// List registered units as `(name, description)` pairs
pub fn list_configuration_units() -> Vec<(&'static str, &'static str)> {
    let mut units: Vec<_> = CONFIGURATION_UNITS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect();
    units.sort_unstable();
    units
}
