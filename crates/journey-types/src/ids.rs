//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every event record carries its own identifier, and emergency events
//! additionally reference an incident. Both are random (version 4) UUIDs.
//! They are only ever built from bytes drawn from the journey's seeded
//! random source, so a fixed seed reproduces the same identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Build a version 4 identifier from 16 caller-supplied random
            /// bytes. The version and variant bits are overwritten.
            pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
                Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier of a single emitted event record.
    ///
    /// Also used as the message key when the event is published.
    EventId
}

define_id! {
    /// Identifier of the incident referenced by an emergency event.
    IncidentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_produce_version_four() {
        let id = EventId::from_random_bytes([0xAB; 16]);
        assert_eq!(id.into_inner().get_version_num(), 4);
        assert_eq!(id.into_inner().get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn same_bytes_same_identifier() {
        let a = IncidentId::from_random_bytes([7; 16]);
        let b = IncidentId::from_random_bytes([7; 16]);
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let id = EventId::from_random_bytes([0x11; 16]);
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{}\"", id.into_inner().hyphenated()));
    }
}
