//! Event signals delivered to the engine.

/// An external event: an integer type plus opaque application data.
///
/// The engine never inspects either field; it only hands the event to
/// callbacks and guards.
#[derive(Clone, Debug, PartialEq)]
pub struct Event<D = ()> {
    pub kind: u32,
    pub data: D,
}

impl<D> Event<D> {
    pub fn new(kind: u32, data: D) -> Self {
        Self { kind, data }
    }
}

impl Event<()> {
    /// An event that carries only its type.
    pub fn signal(kind: u32) -> Self {
        Self { kind, data: () }
    }
}
