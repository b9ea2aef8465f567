//! Allocation Model
//!
//! The unified aggregate for both front-of-house subsystems: a restaurant
//! order holding a dining table, or an event booking holding a venue for a
//! calendar date. One table, one lifecycle, one `kind` discriminator.

use serde::{Deserialize, Serialize};

/// Which subsystem an allocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AllocationKind {
    TableOrder,
    VenueEvent,
}

impl AllocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AllocationKind::TableOrder => "TABLE_ORDER",
            AllocationKind::VenueEvent => "VENUE_EVENT",
        }
    }
}

/// Allocation lifecycle status
///
/// One linear lifecycle shared by orders and bookings:
///
/// ```text
/// PENDING -> CONFIRMED -> PREPARING -> READY -> COMPLETED
///                                               CANCELLED (from any non-terminal state)
/// ```
///
/// The kitchen-facing stages carry the alternate wire labels the two
/// subsystems historically used: `IN_PROGRESS` for `PREPARING` and
/// `SERVED` for `COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AllocationStatus {
    Pending,
    Confirmed,
    #[serde(alias = "IN_PROGRESS")]
    Preparing,
    Ready,
    #[serde(alias = "SERVED")]
    Completed,
    Cancelled,
}

impl AllocationStatus {
    /// Next stage in the linear lifecycle, if any
    pub fn successor(self) -> Option<Self> {
        match self {
            AllocationStatus::Pending => Some(AllocationStatus::Confirmed),
            AllocationStatus::Confirmed => Some(AllocationStatus::Preparing),
            AllocationStatus::Preparing => Some(AllocationStatus::Ready),
            AllocationStatus::Ready => Some(AllocationStatus::Completed),
            AllocationStatus::Completed | AllocationStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AllocationStatus::Completed | AllocationStatus::Cancelled)
    }

    /// A transition is legal only to the declared successor, or to
    /// `Cancelled` from any non-terminal state.
    pub fn can_transition_to(self, requested: Self) -> bool {
        if requested == AllocationStatus::Cancelled {
            return !self.is_terminal();
        }
        self.successor() == Some(requested)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AllocationStatus::Pending => "PENDING",
            AllocationStatus::Confirmed => "CONFIRMED",
            AllocationStatus::Preparing => "PREPARING",
            AllocationStatus::Ready => "READY",
            AllocationStatus::Completed => "COMPLETED",
            AllocationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AllocationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(AllocationStatus::Pending),
            "CONFIRMED" => Ok(AllocationStatus::Confirmed),
            "PREPARING" | "IN_PROGRESS" => Ok(AllocationStatus::Preparing),
            "READY" => Ok(AllocationStatus::Ready),
            "COMPLETED" | "SERVED" => Ok(AllocationStatus::Completed),
            "CANCELLED" => Ok(AllocationStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Allocation entity (order/booking header)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Allocation {
    pub id: i64,
    pub kind: AllocationKind,
    /// Dining table id or venue id, depending on `kind`
    pub resource_id: i64,
    /// Calendar date (`YYYY-MM-DD`) for venue events, NULL for table orders
    pub window_date: Option<String>,
    /// Human-readable reference number, unique
    pub reference: String,
    pub status: AllocationStatus,
    pub customer_name: Option<String>,
    /// Guests at the table, or attendees at the venue
    pub party_size: Option<i32>,
    pub special_instructions: Option<String>,
    /// Derived: always the sum of live line-item subtotals
    pub total_amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Allocation line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AllocationItem {
    pub id: i64,
    pub allocation_id: i64,
    pub menu_item_id: i64,
    /// Catalog name snapshotted at creation
    pub name: String,
    /// Catalog price snapshotted at creation; never re-read later
    pub unit_price: f64,
    pub quantity: i32,
    /// quantity x unit_price
    pub subtotal: f64,
    pub special_requests: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Allocation with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationView {
    #[serde(flatten)]
    pub allocation: Allocation,
    pub items: Vec<AllocationItem>,
}

/// Create restaurant order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: i64,
    pub customer_name: Option<String>,
    pub number_of_guests: Option<i32>,
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemCreate>,
}

/// Line item within an order create / add-item request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub special_requests: Option<String>,
}

/// Create venue booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub venue_id: i64,
    /// Calendar date, `YYYY-MM-DD`
    pub event_date: String,
    pub attendees: i32,
    pub customer_name: String,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationStatusUpdate {
    pub status: AllocationStatus,
}

/// Update line-item quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemQuantityUpdate {
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::AllocationStatus::*;

    #[test]
    fn lifecycle_follows_declared_successors() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
    }

    #[test]
    fn skipping_stages_is_illegal() {
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Ready));
        assert!(!Preparing.can_transition_to(Completed));
    }

    #[test]
    fn no_backwards_transitions() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(Preparing));
        assert!(!Completed.can_transition_to(Ready));
    }

    #[test]
    fn cancel_is_reachable_from_every_non_terminal_state() {
        for status in [Pending, Confirmed, Preparing, Ready] {
            assert!(status.can_transition_to(Cancelled), "{status} should cancel");
        }
    }

    #[test]
    fn terminal_states_are_frozen() {
        for requested in [Pending, Confirmed, Preparing, Ready, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(requested));
            assert!(!Cancelled.can_transition_to(requested));
        }
    }

    #[test]
    fn legacy_wire_labels_parse() {
        assert_eq!("IN_PROGRESS".parse::<super::AllocationStatus>(), Ok(Preparing));
        assert_eq!("SERVED".parse::<super::AllocationStatus>(), Ok(Completed));
        assert_eq!("served".parse::<super::AllocationStatus>(), Ok(Completed));
    }
}
