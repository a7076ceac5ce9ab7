//! Parameter introspection for host-facing controls.
//!
//! Hosts, the CLI, and tests discover an effect's parameters through the
//! [`ParameterInfo`] trait. Each parameter is described by a
//! [`ParamDescriptor`] carrying display metadata, a valid range, and a stable
//! [`ParamId`] for automation.
//!
//! Values crossing this interface are in plain units (0–100 for a
//! percentage).
//!
//! # Example
//!
//! ```rust
//! use spool_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     amount: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::percent("Trim", "Trim", 50.0)
//!                 .with_id(ParamId(10), "trim_amount")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.amount,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.amount = value.clamp(0.0, 100.0);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { amount: 50.0 };
//! trim.set_param(0, 150.0);
//! assert_eq!(trim.get_param(0), 100.0);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter: hosts
/// store it in automation lanes and sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Unit used when formatting a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParamUnit {
    /// Percentage (0–100).
    Percent,
}

impl ParamUnit {
    /// Display suffix for values in this unit.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Percent => "%",
        }
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the effect instance. Out-of-range indices are ignored by setters and read
/// as `0.0`.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` in plain units.
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index` in plain units, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.name.eq_ignore_ascii_case(name) || d.short_name.eq_ignore_ascii_case(name)
            })
        })
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for small displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value on construction.
    pub default: f32,
    /// Recommended step increment for encoder-style control.
    pub step: f32,
    /// Stable numeric ID for host automation.
    pub id: ParamId,
    /// Human-readable stable ID (e.g. `"tape_drive"`).
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Percentage parameter (0–100 %, step 0.1).
    pub const fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 100.0,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's range. NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Knob {
        value: f32,
    }

    impl ParameterInfo for Knob {
        fn param_count(&self) -> usize {
            1
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(ParamDescriptor::percent("Amount", "Amt", 25.0).with_id(ParamId(7), "knob_amount")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.value,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if let Some(desc) = self.param_info(index) {
                self.value = desc.clamp(value);
            }
        }
    }

    #[test]
    fn descriptor_clamps() {
        let desc = ParamDescriptor::percent("Drive", "Drive", 0.0);
        assert_eq!(desc.clamp(-5.0), 0.0);
        assert_eq!(desc.clamp(250.0), 100.0);
        assert_eq!(desc.clamp(42.0), 42.0);
        assert_eq!(desc.clamp(f32::NAN), 0.0);
        assert!(desc.flags.contains(ParamFlags::AUTOMATABLE));
        assert_eq!(desc.unit.suffix(), "%");
    }

    #[test]
    fn lookup_by_name() {
        let knob = Knob { value: 0.0 };
        assert_eq!(knob.find_param_by_name("amount"), Some(0));
        assert_eq!(knob.find_param_by_name("AMT"), Some(0));
        assert_eq!(knob.find_param_by_name("missing"), None);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut knob = Knob { value: 10.0 };
        knob.set_param(3, 99.0);
        assert_eq!(knob.get_param(0), 10.0);
        assert_eq!(knob.get_param(3), 0.0);
        assert!(knob.param_info(1).is_none());
    }
}
