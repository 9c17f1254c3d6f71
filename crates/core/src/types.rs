//! Core types used throughout migrant
//!
//! This module contains the closed vocabularies shared by the IR and the
//! code generator: schema builder methods, referential actions, input
//! artifacts, and template kinds.

use serde::{Serialize, Serializer};
use std::fmt;

// ============================================================================
// Builder Methods
// ============================================================================

/// A Laravel schema builder method a column renders to
///
/// Classification produces the "raw" methods (`Integer`, `Timestamp`, ...);
/// the column normalizers produce the shorthand ones (`SoftDeletes`,
/// `Timestamps`, `RememberToken`, `Id`). A source type with no mapping
/// becomes [`BuilderMethod::Unknown`], rendered as `UNKNOWN:<type>` so a
/// human reviewer can find it in the generated file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuilderMethod {
    // Integer family
    Integer,
    BigInteger,
    MediumInteger,
    SmallInteger,
    TinyInteger,
    Boolean,

    // Fixed / floating point
    Decimal,
    Double,
    Float,

    // Strings
    Char,
    String,
    Text,
    TinyText,
    MediumText,
    LongText,
    Binary,

    // Date/Time
    Date,
    DateTime,
    Time,
    Timestamp,

    // Enumerations
    Enum,
    Set,

    Json,

    // Shorthands produced by the normalizers
    SoftDeletes,
    Timestamps,
    NullableTimestamps,
    RememberToken,
    Id,

    /// Source type without a mapping (holds the lower-cased type name)
    Unknown(String),
}

impl BuilderMethod {
    /// Sentinel prefix for unmapped source types
    pub const UNKNOWN_PREFIX: &'static str = "UNKNOWN:";

    /// The builder method name as it appears after `$table->`
    pub fn as_str(&self) -> &str {
        match self {
            BuilderMethod::Integer => "integer",
            BuilderMethod::BigInteger => "bigInteger",
            BuilderMethod::MediumInteger => "mediumInteger",
            BuilderMethod::SmallInteger => "smallInteger",
            BuilderMethod::TinyInteger => "tinyInteger",
            BuilderMethod::Boolean => "boolean",
            BuilderMethod::Decimal => "decimal",
            BuilderMethod::Double => "double",
            BuilderMethod::Float => "float",
            BuilderMethod::Char => "char",
            BuilderMethod::String => "string",
            BuilderMethod::Text => "text",
            BuilderMethod::TinyText => "tinyText",
            BuilderMethod::MediumText => "mediumText",
            BuilderMethod::LongText => "longText",
            BuilderMethod::Binary => "binary",
            BuilderMethod::Date => "date",
            BuilderMethod::DateTime => "dateTime",
            BuilderMethod::Time => "time",
            BuilderMethod::Timestamp => "timestamp",
            BuilderMethod::Enum => "enum",
            BuilderMethod::Set => "set",
            BuilderMethod::Json => "json",
            BuilderMethod::SoftDeletes => "softDeletes",
            BuilderMethod::Timestamps => "timestamps",
            BuilderMethod::NullableTimestamps => "nullableTimestamps",
            BuilderMethod::RememberToken => "rememberToken",
            BuilderMethod::Id => "id",
            BuilderMethod::Unknown(raw) => raw,
        }
    }

    /// Whether this is one of the integer-family methods
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            BuilderMethod::Integer
                | BuilderMethod::BigInteger
                | BuilderMethod::MediumInteger
                | BuilderMethod::SmallInteger
                | BuilderMethod::TinyInteger
        )
    }

    /// Whether defaults for this method render as bare numeric literals
    pub fn is_numeric(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                BuilderMethod::Decimal | BuilderMethod::Double | BuilderMethod::Float
            )
    }

    /// Whether arguments are a list of literal options (`enum` / `set`)
    pub fn is_enumeration(&self) -> bool {
        matches!(self, BuilderMethod::Enum | BuilderMethod::Set)
    }

    /// Whether this method is a source type the classifier could not map
    pub fn is_unknown(&self) -> bool {
        matches!(self, BuilderMethod::Unknown(_))
    }

    /// The auto-incrementing counterpart of an integer-family method
    pub fn increments_name(&self) -> Option<&'static str> {
        match self {
            BuilderMethod::Integer => Some("increments"),
            BuilderMethod::BigInteger => Some("bigIncrements"),
            BuilderMethod::MediumInteger => Some("mediumIncrements"),
            BuilderMethod::SmallInteger => Some("smallIncrements"),
            BuilderMethod::TinyInteger => Some("tinyIncrements"),
            _ => None,
        }
    }

    /// The unsigned counterpart of an integer-family method
    pub fn unsigned_name(&self) -> Option<&'static str> {
        match self {
            BuilderMethod::Integer => Some("unsignedInteger"),
            BuilderMethod::BigInteger => Some("unsignedBigInteger"),
            BuilderMethod::MediumInteger => Some("unsignedMediumInteger"),
            BuilderMethod::SmallInteger => Some("unsignedSmallInteger"),
            BuilderMethod::TinyInteger => Some("unsignedTinyInteger"),
            _ => None,
        }
    }
}

impl fmt::Display for BuilderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderMethod::Unknown(raw) => write!(f, "{}{}", Self::UNKNOWN_PREFIX, raw),
            other => f.write_str(other.as_str()),
        }
    }
}

impl Serialize for BuilderMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Foreign key ON DELETE / ON UPDATE rule
///
/// Rules the database reports that are not in the standard set are kept
/// verbatim in [`ReferentialAction::Other`] and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ReferentialAction {
    Cascade,
    #[default]
    Restrict,
    SetNull,
    SetDefault,
    NoAction,
    Other(String),
}

impl ReferentialAction {
    /// Parse a rule as reported by `information_schema.REFERENTIAL_CONSTRAINTS`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "" | "RESTRICT" => ReferentialAction::Restrict,
            "CASCADE" => ReferentialAction::Cascade,
            "SET NULL" => ReferentialAction::SetNull,
            "SET DEFAULT" => ReferentialAction::SetDefault,
            "NO ACTION" => ReferentialAction::NoAction,
            _ => ReferentialAction::Other(trimmed.to_string()),
        }
    }

    /// SQL spelling of the rule
    pub fn as_sql(&self) -> &str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl Serialize for ReferentialAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Input Artifacts
// ============================================================================

/// One tab-separated input extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    /// One row per column
    Structure,
    /// One row per index entry
    Keys,
    /// One row per foreign key column
    Constraints,
    /// Single row holding the table charset and collation
    TableCharsetAndCollation,
    /// One row per foreign key, incremental mode only
    ForeignStructure,
}

impl Artifact {
    /// Default file name for the artifact inside an input directory
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Artifact::Structure => "rowsStructure.tsv",
            Artifact::Keys => "rowsKeys.tsv",
            Artifact::Constraints => "rowsConstraints.tsv",
            Artifact::TableCharsetAndCollation => "rowsTableCharsetAndCollation.tsv",
            Artifact::ForeignStructure => "rowsForeignStructure.tsv",
        }
    }

    /// Human readable label used in logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Structure => "structure",
            Artifact::Keys => "keys",
            Artifact::Constraints => "constraints",
            Artifact::TableCharsetAndCollation => "table charset and collation",
            Artifact::ForeignStructure => "foreign structure",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Generation Mode / Templates
// ============================================================================

/// Which migration the generator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Full `Schema::create` migration
    #[default]
    CreateTable,
    /// Foreign keys added to an existing table
    AddForeignKeys,
}

impl GenerationMode {
    /// The stub template used by this mode
    pub fn template(&self) -> TemplateKind {
        match self {
            GenerationMode::CreateTable => TemplateKind::Create,
            GenerationMode::AddForeignKeys => TemplateKind::ForeignKey,
        }
    }

    /// The artifacts this mode cannot run without
    pub fn required_artifacts(&self) -> &'static [Artifact] {
        match self {
            GenerationMode::CreateTable => &[Artifact::Structure],
            GenerationMode::AddForeignKeys => &[Artifact::ForeignStructure],
        }
    }
}

/// One of the two fixed stub templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Create,
    ForeignKey,
}

impl TemplateKind {
    /// Stub file name
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Create => "create.stub",
            TemplateKind::ForeignKey => "foreign_key.stub",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
