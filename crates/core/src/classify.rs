//! Per-record classification.
//!
//! Pure functions applied once to every row at load time. None of them can
//! fail: unknown BDC codes fall into the "not available" bucket and the red
//! outline colour.

use rust_decimal::Decimal;

use crate::types::{AllocationStatus, AvailabilityClass, ColorToken};

/// BDC code for stock released for allocation.
pub const BDC_AVAIL: &str = "AVAIL";
/// BDC code for stock held by quality control.
pub const BDC_QCLOCK: &str = "QCLOCK";
/// BDC code for stock that has passed quality control.
pub const BDC_QCPASSED: &str = "QCPASSED";

/// Codes the classifier recognizes. Anything else is still classified but
/// gets logged by the loader.
pub const KNOWN_BDC_CODES: [&str; 3] = [BDC_AVAIL, BDC_QCLOCK, BDC_QCPASSED];

/// Classify how much of a batch is reserved.
///
/// The full-allocation check runs first, so a batch with zero system quantity
/// and zero reservations counts as fully allocated.
#[must_use]
pub fn classify_allocation(system_qty: Decimal, reserved_qty: Decimal) -> AllocationStatus {
    if system_qty <= reserved_qty {
        AllocationStatus::FullyAllocated
    } else if reserved_qty.is_zero() {
        AllocationStatus::NotAllocated
    } else {
        AllocationStatus::PartiallyAllocated
    }
}

/// Classify a BDC code as available or not.
#[must_use]
pub fn classify_availability(bdc: &str) -> AvailabilityClass {
    if bdc == BDC_AVAIL || bdc == BDC_QCPASSED {
        AvailabilityClass::Available
    } else {
        AvailabilityClass::Unavailable
    }
}

/// Plot fill colour for an allocation status.
#[must_use]
pub const fn fill_color_for(status: AllocationStatus) -> ColorToken {
    match status {
        AllocationStatus::FullyAllocated => ColorToken::MidnightBlue,
        AllocationStatus::NotAllocated => ColorToken::LightBlue,
        AllocationStatus::PartiallyAllocated => ColorToken::SteelBlue,
    }
}

/// Plot outline colour for a BDC code.
#[must_use]
pub fn line_color_for(bdc: &str) -> ColorToken {
    match bdc {
        BDC_AVAIL => ColorToken::Green,
        BDC_QCLOCK => ColorToken::Yellow,
        _ => ColorToken::Red,
    }
}

/// Whether the classifier has a dedicated rule for this code.
#[must_use]
pub fn is_known_bdc(bdc: &str) -> bool {
    KNOWN_BDC_CODES.contains(&bdc)
}
