//! Messenger (reporter) capability

use super::fields::Configurable;
use std::any::Any;
use std::fmt;

/// Capability set of a messenger variant
///
/// A pipeline owns exactly one messenger, which downstream execution uses
/// to report stage outcomes.
pub trait Messenger: Configurable + fmt::Debug + Send + Sync {
    /// Registered type name of this variant
    fn kind(&self) -> &'static str;

    /// Access to the concrete variant
    fn as_any(&self) -> &dyn Any;
}

impl dyn Messenger {
    /// Downcasts to a concrete messenger type
    #[must_use]
    pub fn downcast_ref<T: Messenger + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
