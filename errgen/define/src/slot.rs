//! Message slot numbering.
//!
//! Every catalog entry owns a message slot whose numeric id ties the message
//! constant to the constructor that uses it. Ids follow declaration order,
//! start at 1 and never take the value [`RESERVED_SLOT`].

/// Slot id that is never assigned.
///
/// Legacy constant with no recorded rationale. Catalogs generated by earlier
/// releases skip it, so ids after it stay shifted by one for compatibility.
pub const RESERVED_SLOT: u32 = 13;

/// Numeric identifier of an entry's message data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageSlot(u32);

impl MessageSlot {
    /// Slot for the entry at zero-based `position` in the catalog.
    ///
    /// ## Examples
    ///
    /// ```
    /// use errgen_define::MessageSlot;
    ///
    /// assert_eq!(MessageSlot::for_position(0).id(), 1);
    /// assert_eq!(MessageSlot::for_position(11).id(), 12);
    /// assert_eq!(MessageSlot::for_position(12).id(), 14);
    /// assert_eq!(MessageSlot::for_position(13).id(), 15);
    /// ```
    pub fn for_position(position: usize) -> Self {
        let natural = u32::try_from(position)
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        if natural >= RESERVED_SLOT {
            MessageSlot(natural.saturating_add(1))
        } else {
            MessageSlot(natural)
        }
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MessageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assigns slots to `count` entries in declaration order.
pub fn assign_slots(count: usize) -> impl Iterator<Item = MessageSlot> {
    (0..count).map(MessageSlot::for_position)
}
