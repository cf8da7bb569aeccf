//! Plain data row types written by output backends.

/// Which relay event a [`TraceRow`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Relay,
    Hello,
    Parked,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Relay  => "relay",
            TraceKind::Hello  => "hello",
            TraceKind::Parked => "parked",
        }
    }
}

/// One observed journey event, flattened for tabular output.
///
/// Stop columns hold diagnostics type codes.  `u32::MAX` means "no stop":
/// the source of an activation relay, the destination of a park without a
/// final destination, both columns of a `parked` row.  `hello` rows put the
/// stop being worked at in `destination_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRow {
    /// Position in the observer's event stream, starting at 0.
    pub seq:              u64,
    pub kind:             TraceKind,
    pub agent_id:         u32,
    pub source_code:      u32,
    pub destination_code: u32,
    pub mode:             &'static str,
    /// `MovementType::raw_value()`; parked rows carry `0` (unset).
    pub movement:         u8,
}
