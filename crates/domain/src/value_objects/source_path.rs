//! Structured address of a single choice slot.
//!
//! A source path names the catalog node a slot belongs to plus the slot's
//! position in that node's flattened choice list. The string form
//! `{origin}-{key}[-lv{level}]-{index}` only exists at the serde boundary:
//!
//! - `class-fighter-lv1-0`
//! - `race-half-elf-1`
//! - `feature-fighting-style-0`
//!
//! Catalog keys ending in `-lv<digits>` are not representable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of catalog node that owns a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginKind {
    Race,
    Subrace,
    Variant,
    Class,
    Subclass,
    Background,
    Feat,
    Feature,
    Asi,
}

impl OriginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginKind::Race => "race",
            OriginKind::Subrace => "subrace",
            OriginKind::Variant => "variant",
            OriginKind::Class => "class",
            OriginKind::Subclass => "subclass",
            OriginKind::Background => "background",
            OriginKind::Feat => "feat",
            OriginKind::Feature => "feature",
            OriginKind::Asi => "asi",
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "race" => Ok(OriginKind::Race),
            "subrace" => Ok(OriginKind::Subrace),
            "variant" => Ok(OriginKind::Variant),
            "class" => Ok(OriginKind::Class),
            "subclass" => Ok(OriginKind::Subclass),
            "background" => Ok(OriginKind::Background),
            "feat" => Ok(OriginKind::Feat),
            "feature" => Ok(OriginKind::Feature),
            "asi" => Ok(OriginKind::Asi),
            _ => Err(DomainError::parse(format!("Unknown source origin: {}", s))),
        }
    }
}

/// Address of one choice slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourcePath {
    origin: OriginKind,
    key: String,
    level: Option<u8>,
    index: usize,
}

impl SourcePath {
    pub fn new(origin: OriginKind, key: impl Into<String>, level: Option<u8>, index: usize) -> Self {
        Self {
            origin,
            key: key.into(),
            level,
            index,
        }
    }

    pub fn race(key: impl Into<String>, index: usize) -> Self {
        Self::new(OriginKind::Race, key, None, index)
    }

    pub fn subrace(key: impl Into<String>, index: usize) -> Self {
        Self::new(OriginKind::Subrace, key, None, index)
    }

    pub fn variant(key: impl Into<String>, index: usize) -> Self {
        Self::new(OriginKind::Variant, key, None, index)
    }

    pub fn class(key: impl Into<String>, level: u8, index: usize) -> Self {
        Self::new(OriginKind::Class, key, Some(level), index)
    }

    pub fn subclass(key: impl Into<String>, level: u8, index: usize) -> Self {
        Self::new(OriginKind::Subclass, key, Some(level), index)
    }

    pub fn background(key: impl Into<String>, index: usize) -> Self {
        Self::new(OriginKind::Background, key, None, index)
    }

    pub fn feat(key: impl Into<String>, index: usize) -> Self {
        Self::new(OriginKind::Feat, key, None, index)
    }

    pub fn feature(key: impl Into<String>, index: usize) -> Self {
        Self::new(OriginKind::Feature, key, None, index)
    }

    pub fn origin(&self) -> OriginKind {
        self.origin
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn level(&self) -> Option<u8> {
        self.level
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.key)?;
        if let Some(level) = self.level {
            write!(f, "-lv{}", level)?;
        }
        write!(f, "-{}", self.index)
    }
}

impl FromStr for SourcePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::parse(format!("Malformed source path: '{}'", s));

        let (origin, rest) = s.split_once('-').ok_or_else(malformed)?;
        let origin: OriginKind = origin.parse()?;

        let (head, index) = rest.rsplit_once('-').ok_or_else(malformed)?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let index: usize = index.parse().map_err(|_| malformed())?;

        // Optional "-lv{n}" segment right before the index
        let (key, level) = match head.rsplit_once("-lv") {
            Some((key, lv)) if !lv.is_empty() && lv.bytes().all(|b| b.is_ascii_digit()) => {
                let level: u8 = lv.parse().map_err(|_| malformed())?;
                (key, Some(level))
            }
            _ => (head, None),
        };

        if key.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(origin, key, level, index))
    }
}

impl TryFrom<String> for SourcePath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourcePath> for String {
    fn from(value: SourcePath) -> Self {
        value.to_string()
    }
}
