//! Ordered set of non-overlapping time ranges.
//!
//! Ranges are closed intervals in milliseconds. The set is kept sorted by
//! start after every mutation and boundary resizes clamp against the
//! neighbors, so adjacent ranges are always at least 1 ms apart.

/// A closed time interval `[start, end]` in milliseconds marking a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true if `position` lies inside the closed interval.
    pub fn includes(&self, position: i64) -> bool {
        position >= self.start && position <= self.end
    }

    /// Closed-interval overlap: touching endpoints count as overlapping.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !(other.end < self.start || other.start > self.end)
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Sorted, pairwise non-overlapping collection of [`TimeRange`]s.
///
/// Mutations report through their return value instead of failing:
/// - `add` is rejected outright (returns false, nothing changes)
/// - `set_start`/`set_end` clamp to the nearest legal value (returns false,
///   but the clamped value IS applied)
///
/// Indices are positions in the start-ordered sequence; passing an index
/// that was not obtained from this set panics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    ranges: Vec<TimeRange>,
    /// Bumped on every accepted add, delete and clear
    revision: u64,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeRange> {
        self.ranges.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeRange> + '_ {
        self.ranges.iter()
    }

    pub fn as_slice(&self) -> &[TimeRange] {
        &self.ranges
    }

    /// Start of the first range, if any.
    pub fn overall_start(&self) -> Option<i64> {
        self.ranges.first().map(|r| r.start)
    }

    /// End of the last range, if any.
    pub fn overall_end(&self) -> Option<i64> {
        self.ranges.last().map(|r| r.end)
    }

    /// Sum of all range lengths in milliseconds.
    pub fn total_selected(&self) -> i64 {
        self.ranges.iter().map(TimeRange::duration).sum()
    }

    /// Change counter for add/delete/clear. Boundary resizes do not bump it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Index of the first range containing `position`.
    pub fn is_at(&self, position: i64) -> Option<usize> {
        self.ranges.iter().position(|r| r.includes(position))
    }

    /// True if no range contains `position`.
    pub fn can_start_at(&self, position: i64) -> bool {
        !self.ranges.iter().any(|r| r.includes(position))
    }

    /// Returns `position` itself when it is inside a range, otherwise the start
    /// of the first range after it. `None` when nothing follows.
    pub fn find_next_valid_position(&self, position: i64) -> Option<i64> {
        if self.is_at(position).is_some() {
            return Some(position);
        }
        self.ranges.iter().find(|r| r.start > position).map(|r| r.start)
    }

    /// True if `[start, end]` is a positive-length range overlapping nothing.
    pub fn can_add(&self, start: i64, end: i64) -> bool {
        if end <= start {
            return false;
        }
        let candidate = TimeRange::new(start, end);
        !self.ranges.iter().any(|r| r.overlaps(&candidate))
    }

    // ===== Mutations =====

    /// Inserts `[start, end]` if [`SelectionSet::can_add`] allows it.
    ///
    /// Returns true when the range was inserted.
    pub fn add(&mut self, start: i64, end: i64) -> bool {
        if !self.can_add(start, end) {
            return false;
        }
        self.ranges.push(TimeRange::new(start, end));
        // Stable sort; everything but the new range is already ordered
        self.ranges.sort_by_key(|r| r.start);
        self.revision += 1;
        true
    }

    /// Moves the start of range `index`.
    ///
    /// # Arguments
    /// * `index` - Range index (panics if out of range)
    /// * `new_start` - Requested start in milliseconds
    ///
    /// # Returns
    /// * `true` - The start was set to `new_start`, or to the range's own end
    ///   if `new_start` went past it
    /// * `false` - `new_start` touched the previous range; the start was clamped
    ///   to one millisecond after the previous range's end
    pub fn set_start(&mut self, index: usize, new_start: i64) -> bool {
        let prev_end = index.checked_sub(1).map(|i| self.ranges[i].end);
        let range = &mut self.ranges[index];

        if let Some(prev_end) = prev_end {
            if new_start <= prev_end {
                range.start = prev_end + 1;
                return false;
            }
        }

        range.start = new_start.min(range.end);
        true
    }

    /// Moves the end of range `index`; the mirror image of [`SelectionSet::set_start`].
    ///
    /// Clamps to one millisecond before the next range's start (returning false)
    /// and never below the range's own start.
    pub fn set_end(&mut self, index: usize, new_end: i64) -> bool {
        let next_start = self.ranges.get(index + 1).map(|r| r.start);
        let range = &mut self.ranges[index];

        if let Some(next_start) = next_start {
            if new_end >= next_start {
                range.end = next_start - 1;
                return false;
            }
        }

        range.end = new_end.max(range.start);
        true
    }

    /// Removes range `index`. Panics if out of range.
    pub fn delete(&mut self, index: usize) {
        self.ranges.remove(index);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_ranges() -> SelectionSet {
        let mut set = SelectionSet::new();
        assert!(set.add(3000, 4000));
        assert!(set.add(1000, 2000));
        set
    }

    #[test]
    fn test_time_range_includes_is_closed() {
        let r = TimeRange::new(10, 20);
        assert!(r.includes(10));
        assert!(r.includes(20));
        assert!(!r.includes(9));
        assert!(!r.includes(21));
    }

    #[test]
    fn test_time_range_overlaps_touching() {
        let r = TimeRange::new(10, 20);
        assert!(r.overlaps(&TimeRange::new(20, 30)));
        assert!(r.overlaps(&TimeRange::new(0, 10)));
        assert!(r.overlaps(&TimeRange::new(12, 15)));
        assert!(!r.overlaps(&TimeRange::new(21, 30)));
    }

    #[test]
    fn test_add_keeps_sorted() {
        let set = two_ranges();
        assert_eq!(set.as_slice(), &[TimeRange::new(1000, 2000), TimeRange::new(3000, 4000)]);
        assert_eq!(set.revision(), 2);
    }

    #[test]
    fn test_add_rejects_empty_and_negative() {
        let mut set = SelectionSet::new();
        assert!(!set.add(100, 100));
        assert!(!set.add(100, 50));
        assert!(set.is_empty());
        assert_eq!(set.revision(), 0);
    }

    #[test]
    fn test_add_rejects_overlap() {
        let mut set = two_ranges();
        assert!(!set.can_add(1500, 2500));
        assert!(!set.can_add(2000, 2500)); // touches end of first
        assert!(!set.can_add(500, 5000)); // covers both
        assert!(!set.add(2500, 3000)); // touches start of second
        assert_eq!(set.len(), 2);
        assert!(set.can_add(2001, 2999));
        assert!(set.add(2001, 2999));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_set_end_clamped_by_next() {
        let mut set = two_ranges();
        assert!(!set.set_end(0, 3500));
        assert_eq!(set.get(0), Some(&TimeRange::new(1000, 2999)));
    }

    #[test]
    fn test_set_end_unclamped_on_last() {
        let mut set = SelectionSet::new();
        set.add(1000, 5000);
        assert!(set.set_end(0, 50_000));
        assert_eq!(set.get(0), Some(&TimeRange::new(1000, 50_000)));
    }

    #[test]
    fn test_set_end_floor_is_own_start() {
        let mut set = two_ranges();
        assert!(set.set_end(1, 100));
        assert_eq!(set.get(1), Some(&TimeRange::new(3000, 3000)));
    }

    #[test]
    fn test_set_start_clamped_by_previous() {
        let mut set = two_ranges();
        assert!(!set.set_start(1, 2000));
        assert_eq!(set.get(1), Some(&TimeRange::new(2001, 4000)));
        assert!(!set.set_start(1, 10));
        assert_eq!(set.get(1).map(|r| r.start), Some(2001));
    }

    #[test]
    fn test_set_start_ceiling_is_own_end() {
        let mut set = two_ranges();
        assert!(set.set_start(0, 9000));
        assert_eq!(set.get(0), Some(&TimeRange::new(2000, 2000)));
    }

    #[test]
    fn test_set_start_first_range_free() {
        let mut set = two_ranges();
        assert!(set.set_start(0, 0));
        assert_eq!(set.get(0), Some(&TimeRange::new(0, 2000)));
    }

    #[test]
    fn test_resize_does_not_bump_revision() {
        let mut set = two_ranges();
        let revision = set.revision();
        set.set_start(0, 500);
        set.set_end(0, 2500);
        assert_eq!(set.revision(), revision);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut set = two_ranges();
        set.delete(0);
        assert_eq!(set.as_slice(), &[TimeRange::new(3000, 4000)]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.revision(), 4);
    }

    #[test]
    #[should_panic]
    fn test_delete_out_of_range_panics() {
        let mut set = two_ranges();
        set.delete(5);
    }

    #[test]
    fn test_is_at_and_can_start_at() {
        let set = two_ranges();
        assert_eq!(set.is_at(1000), Some(0));
        assert_eq!(set.is_at(4000), Some(1));
        assert_eq!(set.is_at(2500), None);
        assert!(!set.can_start_at(1500));
        assert!(set.can_start_at(2500));
    }

    #[test]
    fn test_find_next_valid_position() {
        let set = two_ranges();
        assert_eq!(set.find_next_valid_position(1500), Some(1500));
        assert_eq!(set.find_next_valid_position(0), Some(1000));
        assert_eq!(set.find_next_valid_position(2500), Some(3000));
        assert_eq!(set.find_next_valid_position(4001), None);
    }

    #[test]
    fn test_aggregates() {
        let set = two_ranges();
        assert_eq!(set.overall_start(), Some(1000));
        assert_eq!(set.overall_end(), Some(4000));
        assert_eq!(set.total_selected(), 2000);

        let empty = SelectionSet::new();
        assert_eq!(empty.overall_start(), None);
        assert_eq!(empty.overall_end(), None);
        assert_eq!(empty.total_selected(), 0);
    }
}
