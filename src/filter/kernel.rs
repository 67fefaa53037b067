use crate::{error::Error, Result};

/// Weights of the reference low pass kernel. They sum to 0.9796 and are
/// deliberately not renormalized.
pub const REFERENCE_WEIGHTS: [f64; 5] = [0.0545, 0.224, 0.4026, 0.224, 0.0545];

const UNIT_SUM_TOLERANCE: f64 = 1e-9;

/// An odd length sequence of weights, centered on its middle tap.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f64>,
}

impl Kernel {
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::EmptyKernel);
        }
        if weights.len() % 2 == 0 {
            return Err(Error::EvenKernelLength(weights.len()));
        }
        if let Some(index) = weights.iter().position(|weight| !weight.is_finite()) {
            return Err(Error::NonFiniteKernelWeight(index));
        }
        let kernel = Kernel { weights };
        let sum = kernel.sum();
        if (sum - 1.0).abs() > UNIT_SUM_TOLERANCE {
            log::info!(
                "Kernel weights sum to {}, output brightness will be scaled accordingly",
                sum
            );
        }
        Ok(kernel)
    }

    pub fn reference() -> Self {
        Kernel {
            weights: REFERENCE_WEIGHTS.to_vec(),
        }
    }

    pub fn identity() -> Self {
        Kernel { weights: vec![1.0] }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of taps on each side of the center tap.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Pairs every weight with its horizontal offset from the center tap.
    pub fn taps(&self) -> impl Iterator<Item = (isize, f64)> + '_ {
        let radius = self.radius() as isize;
        self.weights
            .iter()
            .enumerate()
            .map(move |(index, &weight)| (index as isize - radius, weight))
    }
}
