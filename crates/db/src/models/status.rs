//! Enums backed by SMALLINT lookup tables.
//!
//! Each variant's discriminant matches the seed rows in the corresponding
//! lookup table (`element_purposes`, `reservation_statuses`,
//! `reservation_types`). Over JSON they travel as their variant names.

use serde::{Deserialize, Serialize};

/// Lookup id type matching SMALLINT in the database.
pub type LookupId = i16;

macro_rules! define_lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant, in id order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the database lookup id.
            pub fn id(self) -> LookupId {
                self as LookupId
            }

            /// Variant name, identical to the lookup table's `name` column.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl From<$name> for LookupId {
            fn from(value: $name) -> Self {
                value as LookupId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_lookup_enum! {
    /// Whether a floorplan element can be booked.
    ElementPurpose {
        Reservable = 1,
        Decorative = 2,
    }
}

define_lookup_enum! {
    /// Reservation status. A `NULL` column means unset / waitlist.
    ///
    /// Any status may be replaced by any other; no transition graph applies.
    ReservationStatus {
        Confirmed = 1,
        Seated = 2,
        Completed = 3,
        Rejected = 4,
        NoShow = 5,
        Upcoming = 6,
        Cancelled = 7,
    }
}

define_lookup_enum! {
    /// How the reservation was taken.
    ReservationType {
        OnCall = 1,
        WalkIn = 2,
    }
}

impl Default for ReservationType {
    fn default() -> Self {
        Self::OnCall
    }
}
