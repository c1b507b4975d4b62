/// Check whether `pattern` occurs in `haystack` in order, not necessarily
/// contiguously. Like a subset test, but order matters.
///
/// The haystack is consumed left to right, once. Elements skipped while
/// looking for one pattern element are not reconsidered for the next.
pub fn is_subsequence<P, H>(pattern: P, haystack: H) -> bool
where
    P: IntoIterator,
    H: IntoIterator,
    H::Item: PartialEq<P::Item>,
{
    let mut haystack = haystack.into_iter();
    pattern
        .into_iter()
        .all(|wanted| haystack.by_ref().any(|item| item == wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order() {
        assert!(is_subsequence(["1", "3"], ["1", "2", "3"]));
    }

    #[test]
    fn test_out_of_order() {
        assert!(!is_subsequence(["1", "3"], ["3", "2", "1"]));
    }

    #[test]
    fn test_empty_pattern() {
        assert!(is_subsequence(Vec::<&str>::new(), ["x"]));
        assert!(is_subsequence(Vec::<&str>::new(), Vec::<&str>::new()));
    }

    #[test]
    fn test_empty_haystack() {
        assert!(!is_subsequence(["a"], Vec::<&str>::new()));
    }

    #[test]
    fn test_repeated_element_needs_two_occurrences() {
        assert!(!is_subsequence(["in", "in"], ["let", "in"]));
        assert!(is_subsequence(["in", "in"], ["in", "x", "in"]));
    }

    #[test]
    fn test_lazy_haystack() {
        let text = "{ ... }:\nlet\n  a = 1;\nin\n{\n}\n";
        assert!(is_subsequence(["let", "in"], text.lines().map(str::trim)));
        assert!(!is_subsequence(["in", "let"], text.lines().map(str::trim)));
    }
}
