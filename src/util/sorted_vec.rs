use std::{
    cmp::Ordering,
    fmt::{Debug, Formatter, Result as FmtResult},
    ops::Deref,
};

/// Elements kept in the order of a comparator.
///
/// Elements comparing as equal are never stored twice; pushing such an element
/// merges it into the existing one.
#[derive(Clone)]
pub struct SortedVec<T> {
    inner: Vec<T>,
    cmp: fn(&T, &T) -> Ordering,
}

impl<T> SortedVec<T> {
    pub const fn new(cmp: fn(&T, &T) -> Ordering) -> Self {
        Self {
            inner: Vec::new(),
            cmp,
        }
    }

    /// Binary search with the comparator.
    pub fn find(&self, value: &T) -> Result<usize, usize> {
        self.inner
            .binary_search_by(|probe| (self.cmp)(probe, value))
    }

    /// Binary search with a custom compare function that has to agree with
    /// the comparator.
    pub fn find_by<F>(&self, f: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.inner.binary_search_by(f)
    }

    /// Insert `value` at its sorted position or let `merge` combine it with
    /// the element it compares equal to.
    pub fn push_with<F>(&mut self, value: T, merge: F)
    where
        F: FnOnce(&mut T, T),
    {
        match self.find(&value) {
            Ok(i) => merge(&mut self.inner[i], value),
            Err(i) => self.inner.insert(i, value),
        }
    }
}

impl<T> Deref for SortedVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Debug> Debug for SortedVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(&self.inner).finish()
    }
}

impl<T: PartialEq> PartialEq for SortedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

#[cfg(test)]
mod tests {
    use super::SortedVec;

    fn replace<T>(old: &mut T, new: T) {
        *old = new;
    }

    #[test]
    fn sorts_on_push() {
        let mut v = SortedVec::new(i32::cmp);

        for n in [42, 13, 20, 0] {
            v.push_with(n, replace);
        }

        assert_eq!(&v[..], &[0, 13, 20, 42]);
    }

    #[test]
    fn merges_duplicates() {
        let mut v: SortedVec<(i32, i32)> = SortedVec::new(|a, b| a.0.cmp(&b.0));

        v.push_with((1, 10), replace);
        v.push_with((1, 20), replace);
        assert_eq!(&v[..], &[(1, 20)]);

        v.push_with((1, 5), |old, new| old.1 += new.1);
        assert_eq!(&v[..], &[(1, 25)]);
    }
}
