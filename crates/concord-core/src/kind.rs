//! The closed set of relation kinds and their wire styles.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error returned when a relation kind string is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown relation kind: {0}")]
pub struct UnknownKind(pub String);

/// The kind of a relation between two classes.
///
/// This is a closed set; diagram files may carry kind strings outside it,
/// which decode as an absent kind rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Generalization,
    Realization,
    Dependency,
    Aggregation,
    Composition,
    Association,
    SimpleRelation,
}

impl RelationKind {
    /// Canonical wire name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Generalization => "Generalization",
            RelationKind::Realization => "Realization",
            RelationKind::Dependency => "Dependency",
            RelationKind::Aggregation => "Aggregation",
            RelationKind::Composition => "Composition",
            RelationKind::Association => "Association",
            RelationKind::SimpleRelation => "SimpleRelation",
        }
    }

    /// The (line style, head style) pair written for this kind.
    ///
    /// The mapping is fixed; an absent kind uses [`RelationKind::default_style`].
    pub fn style(&self) -> (&'static str, &'static str) {
        match self {
            RelationKind::Generalization => ("Solid", "SolidArrow"),
            RelationKind::Realization => ("LongDashed", "SolidArrow"),
            RelationKind::Dependency => ("Dashed", "WireArrow"),
            RelationKind::Aggregation => ("Solid", "Diamond"),
            RelationKind::Composition => ("Solid", "FilledDiamond"),
            RelationKind::Association => ("Solid", "WireArrow"),
            RelationKind::SimpleRelation => ("Solid", "None"),
        }
    }

    /// Style written for relations whose kind is absent or unrecognized.
    pub fn default_style() -> (&'static str, &'static str) {
        RelationKind::SimpleRelation.style()
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Generalization" => Ok(RelationKind::Generalization),
            "Realization" => Ok(RelationKind::Realization),
            "Dependency" => Ok(RelationKind::Dependency),
            "Aggregation" => Ok(RelationKind::Aggregation),
            "Composition" => Ok(RelationKind::Composition),
            "SimpleRelation" => Ok(RelationKind::SimpleRelation),
            // Editors emit directed/qualified association spellings; all of
            // them collapse to the plain kind.
            s if s.starts_with("Association") => Ok(RelationKind::Association),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
