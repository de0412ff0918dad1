//! MySQL column type classification
//!
//! Declared types arrive as compact strings (`varchar(20)`, `int unsigned`,
//! `enum('a','b')`). [`SqlType::parse`] splits them into a base name, an
//! argument list and modifiers, and assigns a [`TypeFamily`].

/// Broad family of a MySQL column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeFamily {
    Integer,
    Decimal,
    Float,
    Bit,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    /// CHAR / VARCHAR
    Char,
    /// BINARY / VARBINARY
    Binary,
    Text,
    Blob,
    Json,
    /// GEOMETRY and its subtypes
    Spatial,
    Enum,
    Set,
    /// Anything the classifier does not know
    Other,
}

impl TypeFamily {
    /// Classify a lowercase base type name
    #[must_use]
    pub fn from_base_name(name: &str) -> Self {
        match name {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "bool"
            | "boolean" | "serial" | "int1" | "int2" | "int3" | "int4" | "int8" => Self::Integer,
            "decimal" | "numeric" | "dec" | "fixed" => Self::Decimal,
            "float" | "double" | "real" | "double precision" => Self::Float,
            "bit" => Self::Bit,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "time" => Self::Time,
            "year" => Self::Year,
            "char" | "varchar" | "nchar" | "nvarchar" | "character" => Self::Char,
            "binary" | "varbinary" => Self::Binary,
            "tinytext" | "text" | "mediumtext" | "longtext" | "long" => Self::Text,
            "tinyblob" | "blob" | "mediumblob" | "longblob" => Self::Blob,
            "json" => Self::Json,
            "geometry" | "point" | "linestring" | "polygon" | "multipoint" | "multilinestring"
            | "multipolygon" | "geometrycollection" | "geomcollection" => Self::Spatial,
            "enum" => Self::Enum,
            "set" => Self::Set,
            _ => Self::Other,
        }
    }
}

/// A parsed MySQL column type
///
/// # Examples
///
/// ```
/// use sqlreview_types::mysql::{SqlType, TypeFamily};
///
/// let ty = SqlType::parse("VARCHAR(20) CHARACTER SET utf8mb4");
/// assert_eq!(ty.family(), TypeFamily::Char);
/// assert_eq!(ty.length(), Some(20));
///
/// let ty = SqlType::parse("enum('small','large')");
/// assert_eq!(ty.values(), ["small", "large"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    name: String,
    args: Vec<String>,
    unsigned: bool,
    family: TypeFamily,
}

impl SqlType {
    /// Parse a declared type string. Never fails; unknown names map to
    /// [`TypeFamily::Other`].
    #[must_use]
    pub fn parse(declared: &str) -> Self {
        let declared = declared.trim();
        let (head, args, tail) = match declared.find('(') {
            Some(open) => {
                let close = matching_paren(declared, open).unwrap_or(declared.len());
                let inner = &declared[open + 1..close.min(declared.len())];
                let tail = declared.get(close + 1..).unwrap_or("");
                (&declared[..open], split_args(inner), tail)
            }
            None => (declared, Vec::new(), ""),
        };

        let words: Vec<String> = head
            .split_whitespace()
            .chain(tail.split_whitespace())
            .map(str::to_ascii_lowercase)
            .collect();
        let name = base_name(&words);
        let unsigned = words.iter().any(|w| w == "unsigned");
        let family = TypeFamily::from_base_name(&name);

        Self {
            name,
            args,
            unsigned,
            family,
        }
    }

    /// Lowercase base name, e.g. `varchar`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn family(&self) -> TypeFamily {
        self.family
    }

    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Raw arguments between the parentheses
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// First argument as a length / precision, when numeric
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        self.args.first().and_then(|a| a.trim().parse().ok())
    }

    /// Second argument as a scale, when numeric
    #[must_use]
    pub fn scale(&self) -> Option<u32> {
        self.args.get(1).and_then(|a| a.trim().parse().ok())
    }

    /// Unquoted ENUM / SET members
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        if !matches!(self.family, TypeFamily::Enum | TypeFamily::Set) {
            return Vec::new();
        }
        self.args.iter().map(|a| unquote(a.trim())).collect()
    }

    /// Types that MySQL refuses to give a literal default
    #[must_use]
    pub fn forbids_default(&self) -> bool {
        matches!(
            self.family,
            TypeFamily::Text | TypeFamily::Blob | TypeFamily::Json | TypeFamily::Spatial
        ) || self.name == "serial"
    }

    /// Only DATETIME and TIMESTAMP accept `ON UPDATE`
    #[must_use]
    pub const fn accepts_on_update(&self) -> bool {
        matches!(self.family, TypeFamily::DateTime | TypeFamily::Timestamp)
    }

    /// Inclusive value range of an integer type
    #[must_use]
    pub fn integer_range(&self) -> Option<(i128, i128)> {
        if self.family != TypeFamily::Integer {
            return None;
        }
        let bits: u32 = match self.name.as_str() {
            "tinyint" | "int1" | "bool" | "boolean" => 8,
            "smallint" | "int2" => 16,
            "mediumint" | "int3" => 24,
            "int" | "integer" | "int4" => 32,
            _ => 64,
        };
        if self.unsigned || self.name == "serial" {
            Some((0, (1i128 << bits) - 1))
        } else {
            Some((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1))
        }
    }
}

impl core::fmt::Display for SqlType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args.join(","))?;
        }
        if self.unsigned {
            f.write_str(" unsigned")?;
        }
        Ok(())
    }
}

fn base_name(words: &[String]) -> String {
    match words {
        [first, second, ..] if first == "double" && second == "precision" => {
            "double precision".to_string()
        }
        [first, second, ..] if first == "character" && second == "varying" => {
            "varchar".to_string()
        }
        [first, second, ..] if first == "national" => second.clone(),
        [first, ..] => first.clone(),
        [] => String::new(),
    }
}

fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quoted = false;
    for (i, c) in s.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_args(inner: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in inner.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                current.push(c);
            }
            ',' if !quoted => args.push(core::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() || !args.is_empty() {
        args.push(current.trim().to_string());
    }
    args
}

fn unquote(s: &str) -> String {
    let inner = s
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(s);
    inner.replace("''", "'")
}
