//! Agent and stop identifiers.
//!
//! A `StopId` is the only way an itinerary refers to a stop: it is a dense
//! index handed out by the `StopRegistry`, never an owner, so an agent holding
//! one has no say in how long the stop lives.  An `AgentId` labels trace
//! events and seeds the agent's mock delays.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Never handed out; what `Default` returns.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the owning `Vec`.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        // Traces print `StopId(3)`, matching `Debug`.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a mobile agent, used in traces and for seeding mock delays.
    pub struct AgentId(u32);
}

typed_id! {
    /// Non-owning handle to a stop held by a `StopRegistry`.
    pub struct StopId(u32);
}
