use sampling::source::Source;

/// Identifies which dataset and which slot a value belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    pub dataset: Vec<u8>,
    pub index: Vec<u8>,
}

impl Tag {
    pub fn new(dataset: &[u8], index: &[u8]) -> Self {
        Self {
            dataset: dataset.to_vec(),
            index: index.to_vec(),
        }
    }
}

/// Tags `(dataset, i)` for i in [0, n), the index encoded as a big-endian u64.
pub fn index_tags(dataset: &[u8], n: usize) -> Vec<Tag> {
    (0..n as u64).map(|i| Tag::new(dataset, &i.to_be_bytes())).collect()
}

/// Tags sharing one random dataset identifier, with random indices.
pub fn random_tags(n: usize, source: &mut Source) -> Vec<Tag> {
    let dataset: [u8; 8] = source.next_u64().to_be_bytes();
    (0..n)
        .map(|_| Tag::new(&dataset, &source.next_u64().to_be_bytes()))
        .collect()
}

/// Tags sharing one random dataset identifier, indexed by position like
/// [index_tags]. Two calls yield tags with equal index halves.
pub fn random_tags_same_index(n: usize, source: &mut Source) -> Vec<Tag> {
    let dataset: [u8; 8] = source.next_u64().to_be_bytes();
    index_tags(&dataset, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_helpers() {
        let tags: Vec<Tag> = index_tags(b"dataset-A", 4);
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[2].dataset, b"dataset-A".to_vec());
        assert_eq!(tags[2].index, 2u64.to_be_bytes().to_vec());

        let mut source: Source = Source::new([0u8; 32]);
        let a: Vec<Tag> = random_tags(8, &mut source);
        assert!(a.iter().all(|tag| tag.dataset == a[0].dataset));
        assert_ne!(a[0].index, a[1].index);

        let b: Vec<Tag> = random_tags_same_index(8, &mut source);
        let c: Vec<Tag> = random_tags_same_index(8, &mut source);
        assert_ne!(b[0].dataset, c[0].dataset);
        (0..8).for_each(|i| assert_eq!(b[i].index, c[i].index));
    }
}
