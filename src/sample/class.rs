use std::fmt;

use serde::{Serialize, Deserialize};

/// Discrete class label of a sample.
///
/// `Undefined` marks unlabeled samples and is also the recognized class of a
/// sample that has not been evaluated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SampleClass {
    #[default]
    Undefined,
    Class(usize),
}

impl SampleClass {
    /// Class index, or `None` for `Undefined`.
    pub fn index(&self) -> Option<usize> {
        match self {
            SampleClass::Undefined => None,
            SampleClass::Class(i) => Some(*i),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.index().is_some()
    }
}

impl From<usize> for SampleClass {
    fn from(index: usize) -> Self {
        SampleClass::Class(index)
    }
}

impl fmt::Display for SampleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleClass::Undefined => write!(f, "Undefined(-1)"),
            SampleClass::Class(i) => write!(f, "Class({i})"),
        }
    }
}

/// How a sample's classes are laid out on the network's output nodes.
///
/// - `OneHot`    — one output node per class; the largest output wins.
/// - `Threshold` — exactly two classes on a single output node; an output of
///                 at least 0.5 means class 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    #[default]
    OneHot,
    Threshold,
}

impl OutputEncoding {
    /// Number of output nodes needed for `classes_count` classes.
    pub fn output_width(&self, classes_count: usize) -> usize {
        match self {
            OutputEncoding::OneHot => classes_count,
            OutputEncoding::Threshold => 1,
        }
    }
}
