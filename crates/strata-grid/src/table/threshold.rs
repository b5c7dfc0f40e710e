//! Ordered threshold table.

use serde::{Deserialize, Serialize};

use super::TableError;

/// One band of a [`ThresholdTable`]: its label and exclusive upper bound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Band name.
    pub label: String,
    /// `None` only on the last band, meaning "everything above".
    pub upper: Option<f64>,
}

/// Ordered `(label, upper bound)` pairs splitting values into named bands.
///
/// A value `v` belongs to band `i` iff `upper[i - 1] <= v < upper[i]`.
/// Every real value (and NaN, which lands in the last band) falls into
/// exactly one band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Threshold>", into = "Vec<Threshold>")]
pub struct ThresholdTable {
    entries: Vec<Threshold>,
}

impl ThresholdTable {
    /// Validates and wraps the given bands.
    ///
    /// Boundaries must be finite and strictly increasing, labels unique, and
    /// only the last band open-ended.
    pub fn new(entries: Vec<Threshold>) -> Result<Self, TableError> {
        let Some((last, bounded)) = entries.split_last() else {
            return Err(TableError::Empty);
        };
        if last.upper.is_some() {
            return Err(TableError::OpenBand(last.label.clone()));
        }

        let mut previous: Option<f64> = None;
        for entry in bounded {
            let Some(value) = entry.upper else {
                return Err(TableError::OpenBand(entry.label.clone()));
            };
            if !value.is_finite() {
                return Err(TableError::NonFinite {
                    label: entry.label.clone(),
                    value,
                });
            }
            if let Some(prev) = previous
                && value <= prev
            {
                return Err(TableError::NotIncreasing {
                    label: entry.label.clone(),
                    value,
                    previous: prev,
                });
            }
            previous = Some(value);
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.label == entry.label) {
                return Err(TableError::DuplicateLabel(entry.label.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Convenience constructor from `(label, upper)` pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    ) -> Result<Self, TableError> {
        Self::new(
            pairs
                .into_iter()
                .map(|(label, upper)| Threshold {
                    label: label.to_string(),
                    upper,
                })
                .collect(),
        )
    }

    /// Index of the band containing `value`.
    pub fn band_index(&self, value: f64) -> usize {
        self.entries
            .iter()
            .position(|e| e.upper.is_some_and(|upper| value < upper))
            .unwrap_or(self.entries.len() - 1)
    }

    /// Label of the band containing `value`.
    pub fn band(&self, value: f64) -> &str {
        &self.entries[self.band_index(value)].label
    }

    /// Upper bound of the band named `label`.
    ///
    /// Returns `None` for unknown labels and for the open-ended last band.
    pub fn boundary(&self, label: &str) -> Option<f64> {
        self.position(label).and_then(|i| self.entries[i].upper)
    }

    /// Upper bound of band `index`, `None` past the end or for the last band.
    pub fn boundary_at(&self, index: usize) -> Option<f64> {
        self.entries.get(index).and_then(|e| e.upper)
    }

    /// Lower bound of band `index` (`None` for the first band).
    pub fn lower_bound_at(&self, index: usize) -> Option<f64> {
        index.checked_sub(1).and_then(|i| self.boundary_at(i))
    }

    /// Position of the band named `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }

    /// Returns `true` if `value` falls in the band named `label`.
    pub fn contains(&self, label: &str, value: f64) -> bool {
        self.position(label)
            .is_some_and(|i| self.band_index(value) == i)
    }

    /// Band labels, lowest band first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a valid table has at least one band.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<Threshold>> for ThresholdTable {
    type Error = TableError;

    fn try_from(entries: Vec<Threshold>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ThresholdTable> for Vec<Threshold> {
    fn from(table: ThresholdTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn elevation() -> ThresholdTable {
        ThresholdTable::from_pairs([
            ("sea", Some(1.0)),
            ("plain", Some(5.0)),
            ("hill", Some(8.0)),
            ("mountain", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_half_open_bands() {
        let table = elevation();
        assert_eq!(table.band(-100.0), "sea");
        assert_eq!(table.band(0.999), "sea");
        assert_eq!(table.band(1.0), "plain");
        assert_eq!(table.band(4.999), "plain");
        assert_eq!(table.band(5.0), "hill");
        assert_eq!(table.band(8.0), "mountain");
        assert_eq!(table.band(1e9), "mountain");
    }

    #[test]
    fn test_named_lookup() {
        let table = elevation();
        assert_eq!(table.boundary("hill"), Some(8.0));
        assert_eq!(table.boundary("mountain"), None);
        assert_eq!(table.boundary("lava"), None);
        assert_eq!(table.lower_bound_at(0), None);
        assert_eq!(table.lower_bound_at(3), Some(8.0));
        assert!(table.contains("plain", 1.0));
        assert!(!table.contains("sea", 1.0));
        assert!(!table.contains("lava", 1.0));
    }

    #[test]
    fn test_nan_lands_in_last_band() {
        assert_eq!(elevation().band(f64::NAN), "mountain");
    }

    #[test]
    fn test_invalid_tables_rejected() {
        assert_eq!(ThresholdTable::new(Vec::new()), Err(TableError::Empty));
        assert!(matches!(
            ThresholdTable::from_pairs([("a", Some(2.0)), ("b", Some(2.0)), ("c", None)]),
            Err(TableError::NotIncreasing { .. })
        ));
        assert!(matches!(
            ThresholdTable::from_pairs([("a", None), ("b", None)]),
            Err(TableError::OpenBand(label)) if label == "a"
        ));
        assert!(matches!(
            ThresholdTable::from_pairs([("a", Some(1.0)), ("b", Some(2.0))]),
            Err(TableError::OpenBand(label)) if label == "b"
        ));
        assert!(matches!(
            ThresholdTable::from_pairs([("a", Some(f64::NAN)), ("b", None)]),
            Err(TableError::NonFinite { .. })
        ));
        assert_eq!(
            ThresholdTable::from_pairs([("a", Some(1.0)), ("a", None)]),
            Err(TableError::DuplicateLabel("a".into()))
        );
    }

    #[test]
    fn test_single_open_band_holds_everything() {
        let table = ThresholdTable::from_pairs([("all", None)]).unwrap();
        assert_eq!(table.band_index(-1.0), 0);
        assert_eq!(table.band_index(1.0), 0);
    }

    #[test]
    fn test_banding_is_total_and_disjoint() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let count = rng.random_range(1..8usize);
            let mut bounds: Vec<f64> = (0..count).map(|_| rng.random_range(-50.0..50.0)).collect();
            bounds.sort_by(f64::total_cmp);
            bounds.dedup();

            let labels: Vec<String> = (0..=bounds.len()).map(|i| format!("band{i}")).collect();
            let mut pairs: Vec<(&str, Option<f64>)> = labels
                .iter()
                .zip(bounds.iter())
                .map(|(l, b)| (l.as_str(), Some(*b)))
                .collect();
            pairs.push((labels[bounds.len()].as_str(), None));
            let table = ThresholdTable::from_pairs(pairs).unwrap();

            let mut samples: Vec<f64> = (0..50).map(|_| rng.random_range(-60.0..60.0)).collect();
            samples.extend(bounds.iter().copied());
            for v in samples {
                let matching = labels.iter().filter(|l| table.contains(l, v)).count();
                assert_eq!(matching, 1, "value {v} matched {matching} bands of {bounds:?}");

                let i = table.band_index(v);
                if let Some(lower) = table.lower_bound_at(i) {
                    assert!(lower <= v);
                }
                if let Some(upper) = table.boundary_at(i) {
                    assert!(v < upper);
                }
            }
        }
    }
}
