//! Build summary
//!
//! The only output of a build pass besides the populated registries.

use crate::domain_services::RejectedUnit;
use hiwire_domain::error::Error;
use hiwire_domain::value_objects::Phase;
use std::fmt;

/// Outcome of building one unit
#[derive(Debug, Default)]
pub struct UnitReport {
    /// Unit name
    pub name: String,
    /// Artifacts registered by this unit
    pub registered: Vec<String>,
    /// Existing artifacts the unit reused
    pub reused: Vec<String>,
    /// Recovered problems: property layers skipped, bind failures,
    /// missing dependencies, failed producers
    pub warnings: Vec<Error>,
}

/// Outcome of one phase bucket
#[derive(Debug)]
pub struct PhaseReport {
    /// Phase
    pub phase: Phase,
    /// Build order chosen by the dependency resolver
    pub order: Vec<String>,
    /// Built units, in build order
    pub units: Vec<UnitReport>,
    /// Set when the bucket could not be ordered and was not built
    pub aborted: Option<Error>,
}

impl PhaseReport {
    /// Empty report for a phase
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            order: Vec::new(),
            units: Vec::new(),
            aborted: None,
        }
    }
}

/// Summary of a complete build pass
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Active profile
    pub profile: String,
    /// Problems met while building the system configuration
    pub system_warnings: Vec<Error>,
    /// Units without a valid phase marker
    pub rejected: Vec<RejectedUnit>,
    /// Units left out by the profile filter
    pub filtered: Vec<String>,
    /// Per-phase outcome, in build order
    pub phases: Vec<PhaseReport>,
}

impl BuildReport {
    /// `true` unless a phase bucket was aborted
    pub fn is_success(&self) -> bool {
        self.phases.iter().all(|phase| phase.aborted.is_none())
    }

    /// Errors that aborted a phase
    pub fn fatal_errors(&self) -> Vec<&Error> {
        self.phases
            .iter()
            .filter_map(|phase| phase.aborted.as_ref())
            .collect()
    }

    /// Names of all built units, in build order
    pub fn built_units(&self) -> Vec<&str> {
        self.phases
            .iter()
            .flat_map(|phase| phase.units.iter().map(|unit| unit.name.as_str()))
            .collect()
    }

    /// Names of all registered artifacts, in registration order
    pub fn artifacts(&self) -> Vec<&str> {
        self.phases
            .iter()
            .flat_map(|phase| phase.units.iter())
            .flat_map(|unit| unit.registered.iter().map(String::as_str))
            .collect()
    }

    /// Number of recovered problems across the whole pass
    pub fn warning_count(&self) -> usize {
        self.system_warnings.len()
            + self.rejected.len()
            + self
                .phases
                .iter()
                .flat_map(|phase| phase.units.iter())
                .map(|unit| unit.warnings.len())
                .sum::<usize>()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build summary (profile: {})", self.profile)?;
        for phase in &self.phases {
            match &phase.aborted {
                Some(error) => writeln!(f, "  [{}] aborted: {}", phase.phase, error)?,
                None => writeln!(f, "  [{}] {} unit(s)", phase.phase, phase.units.len())?,
            }
            for unit in &phase.units {
                writeln!(
                    f,
                    "    - {}: {} registered, {} reused, {} warning(s)",
                    unit.name,
                    unit.registered.len(),
                    unit.reused.len(),
                    unit.warnings.len()
                )?;
            }
        }
        if !self.filtered.is_empty() {
            writeln!(f, "  filtered by profile: {}", self.filtered.join(", "))?;
        }
        for rejected in &self.rejected {
            writeln!(f, "  rejected {}: {}", rejected.name, rejected.error)?;
        }
        write!(
            f,
            "  result: {}",
            if self.is_success() { "success" } else { "failure" }
        )
    }
}
