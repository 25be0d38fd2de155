//! Weight vectors for the placement evaluator.
//!
//! A [`WeightVector`] maps every [`Feature`] to a floating-point coefficient.
//! The on-disk format is a flat JSON object keyed by feature name; loading
//! fails if any key is missing, so the active vector in use during a search is
//! always complete. Keys the vector does not know are ignored.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::feature::Feature;

/// A complete coefficient assignment for all 14 features.
///
/// Replaced wholesale when the trainer advances; never mutated key-by-key
/// while a search is using it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    values: [f64; Feature::COUNT],
}

impl WeightVector {
    /// Builds a vector by evaluating `f` for each feature in key order.
    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Feature) -> f64,
    {
        let mut values = [0.0; Feature::COUNT];
        for (slot, feature) in values.iter_mut().zip(Feature::ALL) {
            *slot = f(feature);
        }
        Self { values }
    }

    /// The built-in default vector used whenever a weight file is absent,
    /// corrupt, or incomplete.
    #[must_use]
    pub fn fallback() -> Self {
        Self::from_fn(|feature| match feature {
            Feature::Holes => -8.0,
            Feature::MaxHeight => -3.0,
            Feature::AvgHeight => -1.0,
            Feature::Filled => -0.3,
            Feature::EdgePenalty => -2.0,
            Feature::ClusterScore => 4.0,
            Feature::RowAlmostFull | Feature::ColAlmostFull => 15.0,
            Feature::EmptyRows => 5.0,
            Feature::ComboPreservation => 50.0,
            Feature::PieceFit => 8.0,
            Feature::Diversity => 3.0,
            Feature::ClearedLines => 100.0,
            Feature::ImmediateGain => 1.0,
        })
    }

    /// Returns the coefficient for one feature.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature as usize]
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.values[feature as usize] = value;
    }
}

impl Serialize for WeightVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Feature::COUNT))?;
        for feature in Feature::ALL {
            map.serialize_entry(feature.key(), &self.get(feature))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeightVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WeightVectorVisitor;

        impl<'de> Visitor<'de> for WeightVectorVisitor {
            type Value = WeightVector;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature keys to numbers")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = [0.0; Feature::COUNT];
                let mut seen = [false; Feature::COUNT];
                while let Some((key, value)) = access.next_entry::<String, f64>()? {
                    if let Some(feature) = Feature::from_key(&key) {
                        values[feature as usize] = value;
                        seen[feature as usize] = true;
                    }
                }
                if let Some(missing) = Feature::ALL.into_iter().find(|f| !seen[*f as usize]) {
                    return Err(serde::de::Error::custom(format!(
                        "missing weight: {}",
                        missing.key()
                    )));
                }
                Ok(WeightVector { values })
            }
        }

        deserializer.deserialize_map(WeightVectorVisitor)
    }
}
