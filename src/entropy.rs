use crate::alphabet::{Distribution, Symbol};
use crate::error::{Error, Result};

/// `-Σ p·log2(p)`, in bits per symbol. Every probability must be positive
/// and finite.
pub fn entropy<I>(probabilities: I) -> Result<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut entropy = 0.0;
    for p in probabilities {
        if !(p.is_finite() && p > 0.0) {
            return Err(Error::InvalidProbability(p));
        }
        entropy -= p * p.log2();
    }
    Ok(entropy)
}

impl<S: Symbol> Distribution<S> {
    pub fn entropy(&self) -> Result<f64> {
        entropy(self.probabilities())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entropy_of_fair_coin() {
        assert_eq!(entropy([0.5, 0.5]).unwrap(), 1.0);
    }

    #[test]
    fn entropy_of_certain_outcome() {
        assert_eq!(entropy([1.0]).unwrap(), 0.0);
    }

    #[test]
    fn entropy_of_uniform_alphabet() {
        let h = entropy([0.125; 8]).unwrap();
        assert!((h - 3.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_of_eleven_trials() {
        let closed_form =
            -(8.0 / 11.0) * (4.0f64 / 11.0).log2() - (3.0 / 11.0) * (3.0f64 / 11.0).log2();
        let h = entropy([4.0 / 11.0, 4.0 / 11.0, 3.0 / 11.0]).unwrap();
        assert!((h - closed_form).abs() < 1e-12);
        assert!((h - 1.5726236638951638).abs() < 1e-12);
    }

    #[test]
    fn zero_probability_is_rejected() {
        assert_eq!(entropy([1.0, 0.0]), Err(Error::InvalidProbability(0.0)));
    }

    #[test]
    fn negative_probability_is_rejected() {
        assert_eq!(entropy([-0.25]), Err(Error::InvalidProbability(-0.25)));
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            entropy([f64::NAN]),
            Err(Error::InvalidProbability(p)) if p.is_nan()
        ));
    }

    #[test]
    fn distribution_entropy() {
        let distribution = Distribution::new([('x', 0.5), ('y', 0.25), ('z', 0.25)]).unwrap();
        assert_eq!(distribution.entropy().unwrap(), 1.5);
    }
}
