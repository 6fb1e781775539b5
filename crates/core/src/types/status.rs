//! Status enums derived from stock-on-hand records.

use serde::{Deserialize, Serialize};

/// How much of a batch's system quantity has been reserved against demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Reserved quantity covers the whole system quantity.
    FullyAllocated,
    /// Nothing has been reserved.
    NotAllocated,
    /// Some, but not all, of the system quantity is reserved.
    PartiallyAllocated,
}

impl AllocationStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullyAllocated => "Fully allocated",
            Self::NotAllocated => "Not allocated",
            Self::PartiallyAllocated => "Partially allocated",
        }
    }

    /// The plot fill class for this status.
    #[must_use]
    pub const fn fill_class(self) -> FillClass {
        match self {
            Self::FullyAllocated => FillClass::FullyAllocatedFill,
            Self::NotAllocated => FillClass::UnallocatedFill,
            Self::PartiallyAllocated => FillClass::PartialFill,
        }
    }
}

impl std::fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Plot fill class; one per [`AllocationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillClass {
    FullyAllocatedFill,
    UnallocatedFill,
    PartialFill,
}

/// Whether a batch can be allocated right now, derived from its BDC code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityClass {
    Available,
    Unavailable,
}

impl std::fmt::Display for AvailabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Unavailable => write!(f, "Not available"),
        }
    }
}

/// Availability filter applied on top of the item match.
///
/// The dashboard selector offers exactly these three options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityFilter {
    #[default]
    #[serde(alias = "all_batches")]
    All,
    #[serde(rename = "available", alias = "available_only")]
    AvailableOnly,
    #[serde(rename = "unavailable", alias = "unavailable_only")]
    UnavailableOnly,
}

impl AvailabilityFilter {
    /// Every filter, in selector order.
    pub const ALL: [Self; 3] = [Self::All, Self::AvailableOnly, Self::UnavailableOnly];

    /// Form/query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::AvailableOnly => "available",
            Self::UnavailableOnly => "unavailable",
        }
    }

    /// Selector label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All batches",
            Self::AvailableOnly => "Available batches",
            Self::UnavailableOnly => "Not available batches",
        }
    }

    /// Whether a record with the given class passes this filter.
    #[must_use]
    pub fn admits(self, class: AvailabilityClass) -> bool {
        match self {
            Self::All => true,
            Self::AvailableOnly => class == AvailabilityClass::Available,
            Self::UnavailableOnly => class == AvailabilityClass::Unavailable,
        }
    }
}

impl std::fmt::Display for AvailabilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AvailabilityFilter {
    type Err = String;

    /// Accepts either the form value or the selector label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s) || f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid availability filter: {s}"))
    }
}
