//! Allowed-collision matrix.

use hashbrown::HashSet;

/// Symmetric set of body pairs whose contacts the collision engine ignores.
///
/// Typical entries are adjacent links that always touch, or a gripper and
/// the object it holds.
///
/// # Example
///
/// ```
/// use plan_collision::AllowedCollisionMatrix;
///
/// let acm = AllowedCollisionMatrix::new()
///     .with_allowed("link_1", "link_2");
///
/// assert!(acm.is_allowed("link_2", "link_1"));
/// assert!(!acm.is_allowed("link_1", "table"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedCollisionMatrix {
    pairs: HashSet<(String, String)>,
}

impl AllowedCollisionMatrix {
    /// Creates an empty matrix where every pair is checked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_owned(), b.to_owned())
        } else {
            (b.to_owned(), a.to_owned())
        }
    }

    /// Allows contacts between `a` and `b`.
    pub fn allow(&mut self, a: &str, b: &str) {
        self.pairs.insert(Self::key(a, b));
    }

    /// Builder form of [`allow`](Self::allow).
    #[must_use]
    pub fn with_allowed(mut self, a: &str, b: &str) -> Self {
        self.allow(a, b);
        self
    }

    /// Removes a previously allowed pair.
    pub fn disallow(&mut self, a: &str, b: &str) {
        self.pairs.remove(&Self::key(a, b));
    }

    /// Returns `true` if contacts between `a` and `b` are ignored.
    #[must_use]
    pub fn is_allowed(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Returns the number of allowed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
