use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ParseSpeciesError;

/// Number of measurements per flower.
pub const IRIS_FEATURES: usize = 4;
/// Number of rows in the Iris CSV.
pub const IRIS_SAMPLES: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn index(&self) -> usize {
        match self {
            Species::Setosa => 0,
            Species::Versicolor => 1,
            Species::Virginica => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Setosa => "Iris-setosa",
            Species::Versicolor => "Iris-versicolor",
            Species::Virginica => "Iris-virginica",
        }
    }

    pub fn one_hot(&self) -> Vec<f64> {
        let mut label = vec![0.0; Species::ALL.len()];
        label[self.index()] = 1.0;
        label
    }
}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL.into_iter()
            .find(|sp| sp.name() == s)
            .ok_or_else(|| ParseSpeciesError(s.to_string()))
    }
}

/// Feature rows and one-hot targets, matched by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Vec<Vec<f64>>,
    labels: Vec<Vec<f64>>,
}

impl Dataset {
    /// # Panics
    /// Panics if the two sides differ in length.
    pub fn new(inputs: Vec<Vec<f64>>, labels: Vec<Vec<f64>>) -> Dataset {
        assert_eq!(inputs.len(), labels.len(), "inputs and labels must have equal length");
        Dataset { inputs, labels }
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn labels(&self) -> &[Vec<f64>] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Permutes samples in place, keeping each input with its label.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        self.inputs = order.iter().map(|&i| self.inputs[i].clone()).collect();
        self.labels = order.iter().map(|&i| self.labels[i].clone()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn species_round_trip_names() {
        for sp in Species::ALL {
            assert_eq!(sp.name().parse::<Species>(), Ok(sp));
        }
        let err = "Iris-germanica".parse::<Species>().unwrap_err();
        assert_eq!(err, ParseSpeciesError("Iris-germanica".into()));
        assert_eq!(err.to_string(), "unknown species 'Iris-germanica'");
        assert_eq!(Species::Versicolor.one_hot(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn shuffle_keeps_pairs_together() {
        let inputs: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64]).collect();
        let labels: Vec<Vec<f64>> = (0..30).map(|i| Species::ALL[i % 3].one_hot()).collect();
        let mut data = Dataset::new(inputs, labels);
        let original = data.clone();

        data.shuffle(&mut StdRng::seed_from_u64(5));

        assert_ne!(data, original);
        for (x, y) in data.inputs().iter().zip(data.labels()) {
            let i = x[0] as usize;
            assert_eq!(y, &Species::ALL[i % 3].one_hot());
        }
    }
}
