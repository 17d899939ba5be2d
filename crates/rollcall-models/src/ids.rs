//! Strongly-typed ID newtypes for domain entities.
//!
//! Each entity gets its own wrapper around `Uuid`, so a `StudentId` can never
//! be bound where a `HolidayId` is expected.
//!
//! ```ignore
//! use rollcall_models::ids::{StudentId, SchoolId};
//!
//! fn load(student: StudentId, school: SchoolId) { /* ... */ }
//!
//! load(StudentId::new(), SchoolId::new());   // OK
//! // load(SchoolId::new(), StudentId::new()); // Compile error
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Postgres, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Defines a `Uuid` newtype that binds, decodes, serializes and documents
/// itself exactly like a plain `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(
                value: <Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <Uuid as PgHasArrayType>::array_type_info()
            }
        }
    };
}

define_id!(
    /// A school; every other entity is scoped to one.
    SchoolId
);

define_id!(AcademicSessionId);

define_id!(StudentId);

define_id!(HolidayId);

define_id!(AttendanceRecordId);

define_id!(
    /// The subject of an access token.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        assert_ne!(StudentId::new(), StudentId::new());
    }

    #[test]
    fn test_round_trip_through_uuid() {
        let uuid = Uuid::new_v4();
        let id = StudentId::from(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn test_display_is_bare_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(HolidayId(uuid).to_string(), uuid.to_string());
        assert_eq!(
            format!("{:?}", HolidayId(uuid)),
            format!("HolidayId({uuid})")
        );
    }

    #[test]
    fn test_parse() {
        let uuid = Uuid::new_v4();
        let parsed: SchoolId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed.0, uuid);
        assert!("nope".parse::<SchoolId>().is_err());
    }

    #[test]
    fn test_json_is_plain_string() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&AcademicSessionId(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let back: AcademicSessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, uuid);
    }
}
