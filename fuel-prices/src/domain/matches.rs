//! Result shape shared by every lookup.

use super::{Ccaa, Municipality, Province, Zone};

/// Outcome of a lookup: exactly one distinct hit, or a sorted set of them.
///
/// `Many` is also the "nothing found" case, with an empty vector. Callers
/// that only care about one kind of entity use the `first_*` helpers, which
/// work the same on both variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T: Ord> Matches<T> {
    /// Deduplicate and sort hits, collapsing a lone survivor to `Single`.
    ///
    /// Of several equal hits the first one in `hits` is kept.
    pub fn collect<I: IntoIterator<Item = T>>(hits: I) -> Self {
        let mut distinct: Vec<T> = hits.into_iter().collect();
        // Stable sort, then `dedup` keeps the first of each run.
        distinct.sort();
        distinct.dedup();
        if distinct.len() == 1
            && let Some(only) = distinct.pop()
        {
            return Matches::Single(only);
        }
        Matches::Many(distinct)
    }
}

impl<T> Matches<T> {
    pub fn none() -> Self {
        Matches::Many(Vec::new())
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Matches::Single(one) => std::slice::from_ref(one),
            Matches::Many(all) => all,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn single(&self) -> Option<&T> {
        match self {
            Matches::Single(one) => Some(one),
            Matches::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Matches::Single(one) => vec![one],
            Matches::Many(all) => all,
        }
    }
}

impl Matches<Zone> {
    pub fn first_municipality(&self) -> Option<&Municipality> {
        self.iter().find_map(Zone::as_municipality)
    }

    pub fn first_province(&self) -> Option<&Province> {
        self.iter().find_map(Zone::as_province)
    }

    pub fn first_ccaa(&self) -> Option<&Ccaa> {
        self.iter().find_map(Zone::as_ccaa)
    }
}

impl<T> Default for Matches<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> IntoIterator for Matches<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Matches<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
