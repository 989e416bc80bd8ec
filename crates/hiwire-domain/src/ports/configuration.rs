//! Configuration unit port

use crate::error::Result;
use crate::value_objects::{Producer, PropertySpace, UnitDescriptor};
use downcast_rs::{DowncastSync, impl_downcast};

/// A declarative bundle of producer operations plus metadata.
///
/// The engine calls [`bind`](ConfigurationUnit::bind) once with the unit's
/// merged property space, then asks for the producer table and instantiates
/// each entry.
pub trait ConfigurationUnit: DowncastSync {
    /// Static description: name, package, markers, unit dependencies
    fn descriptor(&self) -> UnitDescriptor;

    /// Base name of the property files for this unit; the unit name by default
    fn property_source(&self) -> String {
        self.descriptor().name
    }

    /// Decode the merged property space into the unit's own settings
    fn bind(&mut self, _properties: &PropertySpace) -> Result<()> {
        Ok(())
    }

    /// Artifacts this unit produces, in declaration order
    fn producers(&self) -> Vec<Producer>;
}

impl_downcast!(sync ConfigurationUnit);
