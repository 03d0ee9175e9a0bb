use serde::{Deserialize, Serialize};

/// Simulated time, in abstract time units.
pub type SimTime = f64;

/// Identifier of a customer, assigned in arrival order starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub(crate) u64);

impl CustomerId {
    /// Create a new customer ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Index into the simulator's customer table
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer-{}", self.0)
    }
}

/// Identifier of a checkout line; also its position in the store's fixed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub(crate) usize);

impl LineId {
    /// Create a new line ID
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID
    pub fn value(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line-{}", self.0)
    }
}
