use utils::map::Map;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey {
    pub(crate) value: Vec<u64>,
}

impl SecretKey {
    pub fn value(&self) -> &[u64] {
        &self.value
    }
}

/// (-a * s, a)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) value: [Vec<u64>; 2],
}

/// (k0, k1) with k0 + k1 * s_out = s_in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchingKey {
    pub(crate) value: [Vec<u64>; 2],
}

/// Switching keys from s^2, s^3, ... to s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelinearizationKey {
    pub(crate) keys: Vec<SwitchingKey>,
}

impl RelinearizationKey {
    /// Largest ciphertext degree this key relinearizes.
    pub fn max_ciphertext_degree(&self) -> usize {
        self.keys.len() + 1
    }
}

/// Switching keys from rotated secrets back to the secret, indexed by
/// canonical column offset, plus the optional row-swap key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RotationKeySet {
    pub(crate) columns: Map<usize, SwitchingKey>,
    pub(crate) rows: Option<SwitchingKey>,
}

impl RotationKeySet {
    /// Adds the keys of `other`, keeping existing keys on overlap.
    pub fn merge(&mut self, other: RotationKeySet) {
        other.columns.into_iter().for_each(|(k, key)| {
            if !self.columns.contains_key(&k) {
                self.columns.insert(k, key);
            }
        });
        if self.rows.is_none() {
            self.rows = other.rows;
        }
    }

    pub(crate) fn column_key(&self, k: usize) -> &SwitchingKey {
        match self.columns.get(&k) {
            Some(key) => key,
            None => panic!("missing rotation key for column offset {}", k),
        }
    }

    pub(crate) fn row_key(&self) -> &SwitchingKey {
        match &self.rows {
            Some(key) => key,
            None => panic!("missing rotation key for row swap"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationKey {
    pub rlk: Option<RelinearizationKey>,
    pub rtks: Option<RotationKeySet>,
}
