use std::fmt;

use crate::sample::class::{OutputEncoding, SampleClass};

/// One input vector together with the network's reaction to it.
///
/// `output`, `error` and `recognized_class` are filled by the forward pass;
/// before the first evaluation they are `None`, `None` and `Undefined`.
#[derive(Debug, Clone)]
pub struct Sample {
    input: Vec<f64>,
    classes_count: usize,
    encoding: OutputEncoding,
    actual_class: SampleClass,
    output: Option<Vec<f64>>,
    error: Option<Vec<f64>>,
    recognized_class: SampleClass,
}

impl Sample {
    /// Creates a one-hot sample over `classes_count` classes. Pass
    /// `SampleClass::Undefined` for samples that only need to be recognized.
    pub fn new(input: &[f64], classes_count: usize, actual_class: SampleClass) -> Sample {
        Sample::with_encoding(input, classes_count, actual_class, OutputEncoding::OneHot)
    }

    /// Creates a two-class sample read from a single output node.
    pub fn binary(input: &[f64], actual_class: SampleClass) -> Sample {
        Sample::with_encoding(input, 2, actual_class, OutputEncoding::Threshold)
    }

    pub fn with_encoding(
        input: &[f64],
        classes_count: usize,
        actual_class: SampleClass,
        encoding: OutputEncoding,
    ) -> Sample {
        Sample {
            input: input.to_vec(),
            classes_count,
            encoding,
            actual_class,
            output: None,
            error: None,
            recognized_class: SampleClass::Undefined,
        }
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn classes_count(&self) -> usize {
        self.classes_count
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Number of output nodes this sample expects from the network.
    pub fn output_width(&self) -> usize {
        self.encoding.output_width(self.classes_count)
    }

    pub fn actual_class(&self) -> SampleClass {
        self.actual_class
    }

    pub fn recognized_class(&self) -> SampleClass {
        self.recognized_class
    }

    pub fn output(&self) -> Option<&[f64]> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&[f64]> {
        self.error.as_deref()
    }

    /// Stores the network output, then derives the error vector and the
    /// recognized class from it.
    pub(crate) fn process_output(&mut self, output: Vec<f64>) {
        let mut error = self.error.take().unwrap_or_default();
        error.clear();
        error.resize(output.len(), 0.0);

        for (i, (e, &o)) in error.iter_mut().zip(output.iter()).enumerate() {
            *e = self.target(i) - o;
        }

        self.recognized_class = match self.encoding {
            OutputEncoding::OneHot => {
                // Only a strictly larger value moves the maximum: ties go to the lowest index.
                let mut best = 0;
                for i in 1..output.len() {
                    if output[i] > output[best] {
                        best = i;
                    }
                }
                SampleClass::Class(best)
            }
            OutputEncoding::Threshold => {
                if output.first().copied().unwrap_or(0.0) >= 0.5 {
                    SampleClass::Class(1)
                } else {
                    SampleClass::Class(0)
                }
            }
        };

        self.output = Some(output);
        self.error = Some(error);
    }

    /// Desired value of output node `i`.
    fn target(&self, i: usize) -> f64 {
        let hit = match self.encoding {
            OutputEncoding::OneHot => self.actual_class == SampleClass::Class(i),
            OutputEncoding::Threshold => self.actual_class == SampleClass::Class(1),
        };
        if hit { 1.0 } else { 0.0 }
    }

    /// Sum of squared error components. Not averaged.
    pub fn estimated_error(&self) -> f64 {
        self.error
            .as_ref()
            .map(|error| error.iter().map(|e| e * e).sum())
            .unwrap_or(0.0)
    }

    /// Adds this sample's (signed, not squared) error into `error_vector`.
    pub fn update_error_vector(&self, error_vector: &mut [f64]) {
        if let Some(error) = &self.error {
            for (acc, e) in error_vector.iter_mut().zip(error.iter()) {
                *acc += e;
            }
        }
    }

    pub fn is_correct(&self) -> bool {
        self.actual_class == self.recognized_class
    }

    /// Forgets the last evaluation.
    pub fn reset(&mut self) {
        self.output = None;
        self.error = None;
        self.recognized_class = SampleClass::Undefined;
    }
}

fn write_vector(f: &mut fmt::Formatter<'_>, values: Option<&[f64]>) -> fmt::Result {
    match values {
        None => write!(f, "null;"),
        Some(values) => {
            for v in values {
                write!(f, "{v}; ")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sample decoding : {};", self.actual_class)?;
        write!(f, "Input : ")?;
        write_vector(f, Some(&self.input))?;
        write!(f, "\nOutput : ")?;
        write_vector(f, self.output())?;
        write!(f, "\nError : ")?;
        write_vector(f, self.error())?;
        writeln!(f, "\nRecognized : {};", self.recognized_class)
    }
}
