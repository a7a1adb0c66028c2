//! Reordering of tiers that carry no relevance signal.

/// Produce a permutation of a list.
///
/// Implementations must neither add nor drop elements. Random
/// implementations must be uniform over permutations; comparator-based
/// "random sorts" do not qualify.
///
/// # Examples
///
/// ```rust
/// use clubfeed_core::Shuffler;
///
/// struct Reverse;
///
/// impl Shuffler for Reverse {
///     fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
///         items.reverse();
///         items
///     }
/// }
///
/// assert_eq!(Reverse.shuffle(vec![1, 2, 3]), vec![3, 2, 1]);
/// ```
pub trait Shuffler {
    /// Return `items` in a new order.
    fn shuffle<T>(&mut self, items: Vec<T>) -> Vec<T>;
}

impl<S: Shuffler + ?Sized> Shuffler for &mut S {
    fn shuffle<T>(&mut self, items: Vec<T>) -> Vec<T> {
        (**self).shuffle(items)
    }
}
