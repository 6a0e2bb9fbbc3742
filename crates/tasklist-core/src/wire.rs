//! Serde adapters for the text forms used in persisted task records.
//!
//! Deadlines and times are stored as strings where "no value" is the empty
//! string. `null` and missing fields are accepted on input as well.

pub(crate) mod optional_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use crate::date::{format_deadline, parse_deadline};

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S>(value: &Option<Date>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&value.map(format_deadline).unwrap_or_default())
    }

    pub(crate) fn deserialize<'de, D>(d: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        parse_deadline(&raw).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod optional_time {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    use crate::date::{format_stored_time, parse_stored_time};

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S>(value: &Option<Time>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&value.map(format_stored_time).unwrap_or_default())
    }

    pub(crate) fn deserialize<'de, D>(d: D) -> Result<Option<Time>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        parse_stored_time(&raw).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub(crate) fn deserialize<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}
