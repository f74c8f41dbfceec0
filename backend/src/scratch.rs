/// Accumulator buffers reused across convolutions. Owned by exactly one
/// evaluator.
#[derive(Debug, Default)]
pub struct ScratchPool {
    acc: Vec<u128>,
}

impl ScratchPool {
    pub fn new(n: usize) -> Self {
        Self {
            acc: vec![0u128; 3 * n],
        }
    }

    /// Zeroed accumulator of at least `len` words.
    pub(crate) fn acc_mut(&mut self, len: usize) -> &mut [u128] {
        if self.acc.len() < len {
            self.acc.resize(len, 0);
        }
        let acc: &mut [u128] = &mut self.acc[..len];
        acc.fill(0);
        acc
    }

    pub fn capacity(&self) -> usize {
        self.acc.len()
    }
}
