//! Database engine dialect
//!
//! The walk-through only understands the MySQL family. Each engine is still
//! kept distinct because rule registration is keyed by engine.

/// Database engine whose DDL is being reviewed
///
/// # Examples
///
/// ```
/// use sqlreview_types::Dialect;
///
/// assert_eq!(Dialect::parse("tidb"), Some(Dialect::TiDB));
/// assert!(Dialect::MariaDB.is_mysql_family());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// MySQL 5.7 / 8.x
    #[default]
    MySQL,

    /// TiDB, MySQL wire compatible
    TiDB,

    /// MariaDB
    MariaDB,

    /// PostgreSQL. Recognized so configs can name it; no walk-through support.
    PostgreSQL,
}

impl Dialect {
    /// Every dialect, in declaration order
    pub const ALL: &'static [Dialect] = &[
        Dialect::MySQL,
        Dialect::TiDB,
        Dialect::MariaDB,
        Dialect::PostgreSQL,
    ];

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// ```
    /// use sqlreview_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("MySQL"), Some(Dialect::MySQL));
    /// assert_eq!(Dialect::parse("pg"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("oracle"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("mysql") {
            Some(Dialect::MySQL)
        } else if s.eq_ignore_ascii_case("tidb") {
            Some(Dialect::TiDB)
        } else if s.eq_ignore_ascii_case("mariadb") {
            Some(Dialect::MariaDB)
        } else if s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("pg")
        {
            Some(Dialect::PostgreSQL)
        } else {
            None
        }
    }

    /// Returns `true` for engines that speak MySQL DDL
    #[inline]
    #[must_use]
    pub const fn is_mysql_family(&self) -> bool {
        matches!(self, Dialect::MySQL | Dialect::TiDB | Dialect::MariaDB)
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySQL => "mysql",
            Dialect::TiDB => "tidb",
            Dialect::MariaDB => "mariadb",
            Dialect::PostgreSQL => "postgresql",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect")
    }
}

impl std::error::Error for DialectParseError {}
