use derive_more::{Display, Error};

/// The requested capacity would give the collection a memory layout larger than [`isize::MAX`]
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Capacity overflow!")]
pub struct CapacityOverflow;
