//! This module provides a trait [`Input`] for representing inputs generated for property based
//! testing, together with helpers for checking token sequences.

use proptest::{prop_assert_eq, test_runner::TestCaseResult};

/// Represents an input generated for testing purposes.
pub trait Input<Output> {
    /// Verifies that the given output complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output) -> TestCaseResult;
}

impl<T, U> Input<&[T]> for &[U]
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &[T]) -> TestCaseResult {
        prop_assert_eq!(self.len(), output.len());

        for (input, output) in self.iter().zip(output.iter()) {
            input.assert(output)?;
        }

        Ok(())
    }
}

/// Collapses every run of equal adjacent items into a single item.
#[must_use]
pub fn merge_adjacent<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut merged: Vec<T> = Vec::new();

    for item in items {
        if merged.last() != Some(&item) {
            merged.push(item);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::merge_adjacent;

    #[test]
    fn merge_adjacent_collapses_runs() {
        assert_eq!(merge_adjacent([1, 1, 2, 3, 3, 3, 1]), vec![1, 2, 3, 1]);
        assert_eq!(merge_adjacent(Vec::<u8>::new()), Vec::<u8>::new());
    }
}
