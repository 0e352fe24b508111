//! Administrative hierarchy: autonomous community, province, municipality.
//!
//! A strict three-level tree. Every entity is identified by its name: two
//! entities of the same kind whose names normalize to the same key are equal,
//! hash equal and sort together, whatever their codes.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::text::{canonicalize_article, match_key};

/// A display name together with its comparison key.
#[derive(Debug, Clone)]
struct Name {
    display: String,
    key: String,
}

impl Name {
    fn new(raw: &str) -> Self {
        let display = canonicalize_article(raw.trim());
        let key = match_key(&display);
        Self { display, key }
    }
}

/// Name-based identity shared by the three hierarchy entities.
macro_rules! name_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.name.key == other.name.key
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name.key.hash(state);
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.name.key.cmp(&other.name.key)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.name.display)
            }
        }
    };
}

/// Autonomous community (CCAA), the top of the hierarchy.
#[derive(Debug, Clone)]
pub struct Ccaa {
    code: u32,
    name: Name,
}

impl Ccaa {
    pub fn new(code: u32, name: &str) -> Self {
        Self {
            code,
            name: Name::new(name),
        }
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    /// Canonical name, article first (`"Comunitat Valenciana"`).
    pub fn display_name(&self) -> &str {
        &self.name.display
    }

    /// Normalized form used for matching.
    pub fn key(&self) -> &str {
        &self.name.key
    }
}

name_identity!(Ccaa);

/// A province and the community it belongs to.
#[derive(Debug, Clone)]
pub struct Province {
    code: u32,
    name: Name,
    ccaa: Ccaa,
}

impl Province {
    pub fn new(code: u32, name: &str, ccaa: Ccaa) -> Self {
        Self {
            code,
            name: Name::new(name),
            ccaa,
        }
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn display_name(&self) -> &str {
        &self.name.display
    }

    pub fn key(&self) -> &str {
        &self.name.key
    }

    pub fn ccaa(&self) -> &Ccaa {
        &self.ccaa
    }
}

name_identity!(Province);

/// A municipality, owning copies of its province and community.
#[derive(Debug, Clone)]
pub struct Municipality {
    code: u32,
    name: Name,
    province: Province,
}

impl Municipality {
    pub fn new(code: u32, name: &str, province: Province) -> Self {
        Self {
            code,
            name: Name::new(name),
            province,
        }
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn display_name(&self) -> &str {
        &self.name.display
    }

    pub fn key(&self) -> &str {
        &self.name.key
    }

    pub fn province(&self) -> &Province {
        &self.province
    }

    /// The community is always the province's community.
    pub fn ccaa(&self) -> &Ccaa {
        self.province.ccaa()
    }
}

name_identity!(Municipality);

/// Level of the hierarchy, ordered from the leaf upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZoneLevel {
    Municipality,
    Province,
    Ccaa,
}

impl ZoneLevel {
    /// Spanish label used in CLI output.
    pub fn label(self) -> &'static str {
        match self {
            ZoneLevel::Municipality => "municipio",
            ZoneLevel::Province => "provincia",
            ZoneLevel::Ccaa => "comunidad autónoma",
        }
    }
}

impl fmt::Display for ZoneLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Any entity of the hierarchy, as returned by name or code resolution.
///
/// Zones sort by name key first and level second, so a municipality sorts
/// right before the province of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Zone {
    Municipality(Municipality),
    Province(Province),
    Ccaa(Ccaa),
}

impl Zone {
    pub fn level(&self) -> ZoneLevel {
        match self {
            Zone::Municipality(_) => ZoneLevel::Municipality,
            Zone::Province(_) => ZoneLevel::Province,
            Zone::Ccaa(_) => ZoneLevel::Ccaa,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Zone::Municipality(m) => m.code(),
            Zone::Province(p) => p.code(),
            Zone::Ccaa(c) => c.code(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Zone::Municipality(m) => m.display_name(),
            Zone::Province(p) => p.display_name(),
            Zone::Ccaa(c) => c.display_name(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Zone::Municipality(m) => m.key(),
            Zone::Province(p) => p.key(),
            Zone::Ccaa(c) => c.key(),
        }
    }

    pub fn as_municipality(&self) -> Option<&Municipality> {
        match self {
            Zone::Municipality(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_province(&self) -> Option<&Province> {
        match self {
            Zone::Province(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_ccaa(&self) -> Option<&Ccaa> {
        match self {
            Zone::Ccaa(c) => Some(c),
            _ => None,
        }
    }
}

impl PartialOrd for Zone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Zone {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key()
            .cmp(other.key())
            .then_with(|| self.level().cmp(&other.level()))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<Municipality> for Zone {
    fn from(m: Municipality) -> Self {
        Zone::Municipality(m)
    }
}

impl From<Province> for Zone {
    fn from(p: Province) -> Self {
        Zone::Province(p)
    }
}

impl From<Ccaa> for Zone {
    fn from(c: Ccaa) -> Self {
        Zone::Ccaa(c)
    }
}
