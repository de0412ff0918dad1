//! Serde helpers for Cow<'static, str> deserialization
//!
//! DDL records hold `Cow<'static, str>` so const definitions can borrow
//! string literals. Deserialized values always come back as `Cow::Owned`.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};

/// Deserialize a String into Cow<'static, str>
pub fn cow_from_string<'de, D>(deserializer: D) -> Result<Cow<'static, str>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Cow::Owned(s))
}

/// Deserialize an Option<String> into Option<Cow<'static, str>>
pub fn cow_option_from_string<'de, D>(
    deserializer: D,
) -> Result<Option<Cow<'static, str>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.map(Cow::Owned))
}

/// Serde default for flags that are `true` unless stated otherwise
pub const fn default_true() -> bool {
    true
}

/// Skip predicate for flags that default to `false`
#[allow(clippy::trivially_copy_pass_by_ref)]
pub const fn is_false(value: &bool) -> bool {
    !*value
}
