//! Order timestamp.
//!
//! Clients send order dates as `YYYY-MM-DD`; the order is stamped at
//! midnight of that day. Responses carry the full timestamp without a
//! timezone suffix, e.g. `2024-01-01T00:00:00`.

use core::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The only accepted input format.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Error returned when an order date string is malformed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("order_date must use the YYYY-MM-DD format (got '{0}')")]
pub struct OrderDateError(String);

/// The date and time an order was placed (UTC, second precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderDate(NaiveDateTime);

impl OrderDate {
    /// Parse a `YYYY-MM-DD` date into a midnight timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDateError`] if the input is not a valid calendar date
    /// in that exact format.
    pub fn parse(s: &str) -> Result<Self, OrderDateError> {
        NaiveDate::parse_from_str(s, ORDER_DATE_FORMAT)
            .map(|date| Self(date.and_time(NaiveTime::MIN)))
            .map_err(|_| OrderDateError(s.to_owned()))
    }

    /// The current UTC time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now().naive_utc();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    /// The underlying timestamp.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(OUTPUT_FORMAT))
    }
}

impl Serialize for OrderDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for OrderDate {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <NaiveDateTime as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <NaiveDateTime as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for OrderDate {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <NaiveDateTime as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for OrderDate {
    fn decode(
        value: <sqlx::Sqlite as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        <NaiveDateTime as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value).map(Self)
    }
}
