use std::ops::{Index, IndexMut};

use crate::sample::sample::Sample;

/// Ordered collection of samples: a training set, a test set or a batch of
/// unlabeled samples waiting to be recognized.
#[derive(Debug, Clone, Default)]
pub struct SamplesSet {
    samples: Vec<Sample>,
}

impl SamplesSet {
    pub fn new() -> SamplesSet {
        SamplesSet { samples: Vec::new() }
    }

    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sample> {
        self.samples.iter_mut()
    }

    /// Fraction of samples whose recognized class matches the actual one.
    /// An empty set scores 0.
    pub fn accuracy(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let correct = self.samples.iter().filter(|s| s.is_correct()).count();
        correct as f64 / self.samples.len() as f64
    }

    /// Sums every sample's signed error into a vector of `width` components.
    pub fn error_vector(&self, width: usize) -> Vec<f64> {
        let mut acc = vec![0.0; width];
        for sample in &self.samples {
            sample.update_error_vector(&mut acc);
        }
        acc
    }

    /// Mean of `Sample::estimated_error` over the set.
    pub fn mean_estimated_error(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self.samples.iter().map(Sample::estimated_error).sum();
        total / self.samples.len() as f64
    }
}

impl Index<usize> for SamplesSet {
    type Output = Sample;

    fn index(&self, i: usize) -> &Sample {
        &self.samples[i]
    }
}

impl IndexMut<usize> for SamplesSet {
    fn index_mut(&mut self, i: usize) -> &mut Sample {
        &mut self.samples[i]
    }
}

impl FromIterator<Sample> for SamplesSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        SamplesSet { samples: iter.into_iter().collect() }
    }
}

impl Extend<Sample> for SamplesSet {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SamplesSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a mut SamplesSet {
    type Item = &'a mut Sample;
    type IntoIter = std::slice::IterMut<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter_mut()
    }
}

impl IntoIterator for SamplesSet {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::class::SampleClass;
    use approx::assert_relative_eq;

    fn evaluated(class: usize, output: Vec<f64>) -> Sample {
        let mut sample = Sample::new(&[0.0], output.len(), SampleClass::Class(class));
        sample.process_output(output);
        sample
    }

    #[test]
    fn empty_set_has_zero_accuracy() {
        let set = SamplesSet::new();
        assert!(set.is_empty());
        assert_eq!(set.accuracy(), 0.0);
        assert_eq!(set.mean_estimated_error(), 0.0);
    }

    #[test]
    fn accuracy_is_ratio_of_correct_samples() {
        let set: SamplesSet = vec![
            evaluated(0, vec![0.9, 0.1]),
            evaluated(1, vec![0.9, 0.1]),
            evaluated(1, vec![0.2, 0.8]),
            evaluated(0, vec![0.6, 0.4]),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 4);
        assert_relative_eq!(set.accuracy(), 0.75);
    }

    #[test]
    fn keeps_insertion_order_and_index_access() {
        let mut set = SamplesSet::new();
        set.add_sample(Sample::new(&[1.0], 2, SampleClass::Class(0)));
        set.add_sample(Sample::new(&[2.0], 2, SampleClass::Class(1)));

        assert_eq!(set[0].input(), &[1.0]);
        assert_eq!(set[1].actual_class(), SampleClass::Class(1));

        set[1] = Sample::new(&[3.0], 2, SampleClass::Class(0));
        let inputs: Vec<f64> = set.iter().map(|s| s.input()[0]).collect();
        assert_eq!(inputs, vec![1.0, 3.0]);
    }

    #[test]
    fn error_vector_sums_signed_errors() {
        let set: SamplesSet = vec![
            evaluated(0, vec![0.75, 0.25]),
            evaluated(1, vec![0.75, 0.25]),
        ]
        .into_iter()
        .collect();

        let acc = set.error_vector(2);
        assert_relative_eq!(acc[0], 0.25 - 0.75);
        assert_relative_eq!(acc[1], -0.25 + 0.75);
        assert_relative_eq!(set.mean_estimated_error(), 0.125 * 0.5 + 1.125 * 0.5);
    }
}
