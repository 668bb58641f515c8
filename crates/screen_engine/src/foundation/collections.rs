//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle to a multi-screen host owned by the scheduler
    ///
    /// Handles stay valid only while the host is alive; a handle left behind
    /// in a queue after its host was destroyed simply fails to resolve.
    pub struct HostHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
