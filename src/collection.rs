//! Containers of colors with stable hex serialization.
//!
//! [`ColorSet`] keeps unique colors in HSL order, [`ColorVector`] keeps
//! colors in insertion order and allows duplicates. Both serialize to a
//! delimiter-joined list of `#RRGGBB` strings in their iteration order.

use std::collections::BTreeSet;

use crate::color::Color;

/// Behavior shared by both collection shapes.
pub trait ColorCollection {
    /// Iterate in the collection's own order.
    fn colors(&self) -> Box<dyn Iterator<Item = &Color> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Each member's hex form joined by `delimiter`.
    fn to_hex_string(&self, delimiter: &str) -> String {
        self.colors()
            .map(Color::to_hex)
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    fn to_hex_vec(&self) -> Vec<String> {
        self.colors().map(Color::to_hex).collect()
    }
}

/// Unique colors iterated in HSL order. Re-inserting a color is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorSet {
    colors: BTreeSet<Color>,
}

impl ColorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the color was not already present.
    pub fn insert(&mut self, color: Color) -> bool {
        self.colors.insert(color)
    }

    /// Insert every color of `other`.
    pub fn merge(&mut self, other: &ColorSet) {
        self.colors.extend(other.colors.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    pub fn first(&self) -> Option<&Color> {
        self.colors.first()
    }

    pub fn into_vector(self) -> ColorVector {
        self.colors.into_iter().collect()
    }
}

impl ColorCollection for ColorSet {
    fn colors(&self) -> Box<dyn Iterator<Item = &Color> + '_> {
        Box::new(self.colors.iter())
    }

    fn len(&self) -> usize {
        self.colors.len()
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

impl Extend<Color> for ColorSet {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, iter: I) {
        self.colors.extend(iter);
    }
}

impl IntoIterator for ColorSet {
    type Item = Color;
    type IntoIter = std::collections::btree_set::IntoIter<Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.into_iter()
    }
}

/// Colors in insertion order; duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorVector {
    colors: Vec<Color>,
}

impl ColorVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: Color) {
        self.colors.push(color);
    }

    /// Append every color of `other`, keeping its order.
    pub fn merge(&mut self, other: &ColorVector) {
        self.colors.extend_from_slice(&other.colors);
    }

    /// Sort in place by the HSL ordering of [`Color`].
    pub fn sort(&mut self) {
        self.colors.sort();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }
}

impl ColorCollection for ColorVector {
    fn colors(&self) -> Box<dyn Iterator<Item = &Color> + '_> {
        Box::new(self.colors.iter())
    }

    fn len(&self) -> usize {
        self.colors.len()
    }
}

impl From<Vec<Color>> for ColorVector {
    fn from(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

impl FromIterator<Color> for ColorVector {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

impl Extend<Color> for ColorVector {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, iter: I) {
        self.colors.extend(iter);
    }
}

impl IntoIterator for ColorVector {
    type Item = Color;
    type IntoIter = std::vec::IntoIter<Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.into_iter()
    }
}
