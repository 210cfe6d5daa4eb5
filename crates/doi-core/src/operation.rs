use crate::types::Ni;
use thiserror::Error as ThisError;

/// Accepted share totals, inclusive both ends. The band below 100 tolerates
/// rounding in source documents.
const TOTAL_MIN: f64 = 98.0;
const TOTAL_MAX: f64 = 100.0;

///
/// OperationError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum OperationError {
    #[error("participant identifier fails the CPF/CNPJ checksum: {ni}")]
    InvalidIdentifier { ni: String },

    #[error("participant already present in operation: {ni}")]
    DuplicateParticipant { ni: String },

    #[error("share must be in (0, 100], got {share} for {ni}")]
    ShareOutOfRange { ni: String, share: f64 },
}

///
/// Operation
///
/// Share table for one side (disposal or acquisition) of a property-record
/// transaction. Deterministic key-ordered entries, unique keys.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operation {
    entries: Vec<(String, f64)>,
}

impl Operation {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a participant's share. The identifier must pass the checksum
    /// gate, must not already be present, and the share must be in
    /// `(0, 100]`.
    pub fn add(&mut self, ni: &str, share: f64) -> Result<(), OperationError> {
        if !Ni::validate(ni) {
            return Err(OperationError::InvalidIdentifier { ni: ni.to_string() });
        }
        if !(share > 0.0 && share <= 100.0) {
            return Err(OperationError::ShareOutOfRange {
                ni: ni.to_string(),
                share,
            });
        }

        match self.find_index(ni) {
            Ok(_) => Err(OperationError::DuplicateParticipant { ni: ni.to_string() }),
            Err(index) => {
                self.entries.insert(index, (ni.to_string(), share));
                Ok(())
            }
        }
    }

    /// Remove the entry for `ni`, returning its share if present.
    pub fn remove(&mut self, ni: &str) -> Option<f64> {
        match self.find_index(ni) {
            Ok(index) => Some(self.entries.remove(index).1),
            Err(_) => None,
        }
    }

    #[must_use]
    pub fn get(&self, ni: &str) -> Option<f64> {
        self.find_index(ni).ok().map(|index| self.entries[index].1)
    }

    #[must_use]
    pub fn contains(&self, ni: &str) -> bool {
        self.find_index(ni).is_ok()
    }

    /// Sum of all shares.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, share)| share).sum()
    }

    /// The share table is valid when its total sits in the 98–100 band.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let total = self.total();
        (TOTAL_MIN..=TOTAL_MAX).contains(&total)
    }

    /// Iterate `(ni, share)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(ni, share)| (ni.as_str(), *share))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Locate a key in the sorted entry list.
    fn find_index(&self, ni: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(candidate, _)| candidate.as_str().cmp(ni))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const CPF_A: &str = "11144477735";
    const CPF_B: &str = "52998224725";
    const CNPJ_C: &str = "11222333000181";

    #[test]
    fn total_band_boundaries_are_inclusive() {
        let mut op = Operation::new();
        op.add(CPF_A, 98.0).unwrap();
        assert!(op.is_valid());

        let mut op = Operation::new();
        op.add(CPF_A, 100.0).unwrap();
        assert!(op.is_valid());

        let mut op = Operation::new();
        op.add(CPF_A, 97.9).unwrap();
        assert!(!op.is_valid());

        let mut op = Operation::new();
        op.add(CPF_A, 60.2).unwrap();
        op.add(CPF_B, 39.9).unwrap();
        assert!(!op.is_valid()); // 100.1
    }

    #[test]
    fn extra_participant_overflows_the_band() {
        let mut op = Operation::new();
        op.add(CPF_A, 60.0).unwrap();
        op.add(CPF_B, 39.0).unwrap();
        assert!(op.is_valid()); // 99

        op.add(CNPJ_C, 5.0).unwrap();
        assert!(!op.is_valid()); // 104
    }

    #[test]
    fn rejects_bad_entries() {
        let mut op = Operation::new();

        assert_eq!(
            op.add("123", 50.0),
            Err(OperationError::InvalidIdentifier { ni: "123".into() })
        );
        assert!(matches!(
            op.add(CPF_A, 0.0),
            Err(OperationError::ShareOutOfRange { .. })
        ));
        assert!(matches!(
            op.add(CPF_A, 100.5),
            Err(OperationError::ShareOutOfRange { .. })
        ));

        op.add(CPF_A, 50.0).unwrap();
        assert_eq!(
            op.add(CPF_A, 25.0),
            Err(OperationError::DuplicateParticipant { ni: CPF_A.into() })
        );
        assert_eq!(op.len(), 1);
    }

    #[test]
    fn remove_decrements_total() {
        let mut op = Operation::new();
        op.add(CPF_A, 60.0).unwrap();
        op.add(CPF_B, 40.0).unwrap();
        assert!(op.is_valid());

        assert_eq!(op.remove(CPF_B), Some(40.0));
        assert_eq!(op.remove(CPF_B), None);
        assert!((op.total() - 60.0).abs() < f64::EPSILON);
        assert!(!op.is_valid());
    }

    #[test]
    fn iterates_in_key_order() {
        let mut op = Operation::new();
        op.add(CPF_B, 50.0).unwrap();
        op.add(CPF_A, 50.0).unwrap();

        let keys: Vec<&str> = op.iter().map(|(ni, _)| ni).collect();
        assert_eq!(keys, vec![CPF_A, CPF_B]);
    }
}
