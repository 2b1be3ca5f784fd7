/// Boolean set operations between regions
pub trait BooleanOps: Sized + Clone {
    /// Points in either region.
    fn union(&self, other: &Self) -> Self;
    /// Points in `self` but not in `other`.
    fn difference(&self, other: &Self) -> Self;
    /// Points in both regions.
    fn intersection(&self, other: &Self) -> Self;
    /// Points in exactly one of the regions.
    fn xor(&self, other: &Self) -> Self;
    /// The complement of the region.
    fn inverse(&self) -> Self;

    /// Union of every region yielded by `regions`, starting from `self`.
    fn union_all<'a, I>(&self, regions: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        regions
            .into_iter()
            .fold(self.clone(), |acc, region| acc.union(region))
    }
}
