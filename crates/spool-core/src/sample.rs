//! Host buffer sample types.
//!
//! Hosts hand over either single- or double-precision buffers. The tape
//! engine always computes in `f64`; [`Sample`] converts at the buffer edge.

/// A sample type that can be read from and written to host buffers.
pub trait Sample: Copy + Default + Send + 'static {
    /// Widen to `f64` for processing.
    fn to_f64(self) -> f64;

    /// Narrow a processed `f64` back to the buffer type.
    fn from_f64(value: f64) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}
