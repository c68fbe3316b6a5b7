//! Unit rescaler.
//!
//! Each axis remembers the prefix currently applied to it. A rescale first
//! undoes that prefix and then applies the new one, so repeated calls never
//! compound: `m` then `m` is the same as `m` once, and `m -> u -> m` restores
//! the original numbers.

use log::debug;

use crate::domain::{Axis, UnitPrefix};
use crate::error::AnalysisError;
use crate::sweep::SweepResult;

impl SweepResult {
    /// Rescale one axis (series and fit curve) to `unit`.
    pub fn change_units(&mut self, axis: Axis, unit: UnitPrefix) {
        let applied = self.unit(axis);
        if applied == unit {
            return;
        }

        let factor = applied.factor() / unit.factor();
        let (series, curve) = match axis {
            Axis::Voltage => (&mut self.voltage, &mut self.fit_curve.x),
            Axis::Current => (&mut self.current, &mut self.fit_curve.y),
        };
        for v in series.iter_mut().chain(curve.iter_mut()) {
            *v *= factor;
        }

        match axis {
            Axis::Voltage => self.voltage_unit = unit,
            Axis::Current => self.current_unit = unit,
        }
        debug!("{axis:?} axis rescaled from '{applied}' to '{unit}'");
    }

    /// String form of `change_units`, e.g. `("V", "m")` or `("I", "n")`.
    ///
    /// Nothing is modified when either argument is rejected.
    pub fn change_units_str(&mut self, axis: &str, unit: &str) -> Result<(), AnalysisError> {
        let axis: Axis = axis.parse()?;
        let unit: UnitPrefix = unit.parse()?;
        self.change_units(axis, unit);
        Ok(())
    }
}
