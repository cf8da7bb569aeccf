//! Relay directive telling the itinerary how to move an agent next.

/// How an agent moves on its next relay.
///
/// The discriminants are stable and written to traces as the raw value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MovementType {
    /// No pending movement (before activation, or right after a relay
    /// consumed the pending one, or after parking).
    #[default]
    Unset   = 0,
    /// Advance to the planned next stop.
    Normal  = 1,
    /// Re-enter the current stop.
    Revisit = 2,
    /// End the journey: visit the final destination, if any, and stop.
    Park    = 3,
}

impl MovementType {
    /// Numeric value used in trace output.
    #[inline]
    pub fn raw_value(self) -> u8 {
        self as u8
    }

    /// `true` for `Normal` and `Revisit`, the movements that deliver work.
    #[inline]
    pub fn delivers_work(self) -> bool {
        matches!(self, MovementType::Normal | MovementType::Revisit)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Unset   => "unset",
            MovementType::Normal  => "normal",
            MovementType::Revisit => "revisit",
            MovementType::Park    => "park",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
