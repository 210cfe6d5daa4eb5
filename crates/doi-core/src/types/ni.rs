//! Checksum validators for Brazilian taxpayer identifiers.
//!
//! A participant identifier ("ni") is either a CPF (individual, 11 digits)
//! or a CNPJ (company, 14 digits), each carrying two modulo-11 check
//! digits. Validation is pure and allocation-free.

/// Decode `ni` into exactly `len` decimal digits, or bail out.
fn digits(ni: &str, len: usize) -> Option<[u8; 14]> {
    if ni.len() != len {
        return None;
    }

    let mut out = [0u8; 14];
    for (i, c) in ni.bytes().enumerate() {
        if !c.is_ascii_digit() {
            return None;
        }
        out[i] = c - b'0';
    }

    Some(out)
}

fn all_identical(digits: &[u8]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

///
/// Cpf
///

pub struct Cpf;

impl Cpf {
    /// Validate an 11-digit CPF string, check digits included.
    ///
    /// All-identical sequences (e.g. `11111111111`) are rejected even when
    /// their checksum happens to hold.
    #[must_use]
    pub fn validate(ni: &str) -> bool {
        let Some(digits) = digits(ni, 11) else {
            return false;
        };
        let digits = &digits[..11];

        if all_identical(digits) {
            return false;
        }

        let first: u32 = (0..9).map(|i| u32::from(digits[i]) * (10 - i as u32)).sum();
        let mut first_check = 11 - (first % 11);
        if first_check >= 10 {
            first_check = 0;
        }
        if u32::from(digits[9]) != first_check {
            return false;
        }

        let second: u32 = (0..10)
            .map(|i| u32::from(digits[i]) * (11 - i as u32))
            .sum();
        let mut second_check = 11 - (second % 11);
        if second_check >= 10 {
            second_check = 0;
        }

        u32::from(digits[10]) == second_check
    }
}

///
/// Cnpj
///

pub struct Cnpj;

const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

impl Cnpj {
    /// Validate a 14-digit CNPJ string, check digits included.
    #[must_use]
    pub fn validate(ni: &str) -> bool {
        let Some(digits) = digits(ni, 14) else {
            return false;
        };

        if all_identical(&digits) {
            return false;
        }

        let first: u32 = CNPJ_WEIGHTS_FIRST
            .iter()
            .zip(&digits)
            .map(|(weight, digit)| weight * u32::from(*digit))
            .sum();
        let first_check = match first % 11 {
            rem if rem < 2 => 0,
            rem => 11 - rem,
        };
        if u32::from(digits[12]) != first_check {
            return false;
        }

        let second: u32 = CNPJ_WEIGHTS_SECOND
            .iter()
            .zip(&digits)
            .map(|(weight, digit)| weight * u32::from(*digit))
            .sum();
        let second_check = match second % 11 {
            rem if rem < 2 => 0,
            rem => 11 - rem,
        };

        u32::from(digits[13]) == second_check
    }
}

///
/// Ni
/// The participant-identity gate: a valid CPF or a valid CNPJ.
///

pub struct Ni;

impl Ni {
    #[must_use]
    pub fn validate(ni: &str) -> bool {
        Cpf::validate(ni) || Cnpj::validate(ni)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Append both CPF check digits to a 9-digit stem.
    fn cpf_from_stem(stem: [u8; 9]) -> String {
        let mut digits = [0u8; 11];
        digits[..9].copy_from_slice(&stem);

        let first: u32 = (0..9).map(|i| u32::from(digits[i]) * (10 - i as u32)).sum();
        let mut check = 11 - (first % 11);
        if check >= 10 {
            check = 0;
        }
        digits[9] = check as u8;

        let second: u32 = (0..10)
            .map(|i| u32::from(digits[i]) * (11 - i as u32))
            .sum();
        let mut check = 11 - (second % 11);
        if check >= 10 {
            check = 0;
        }
        digits[10] = check as u8;

        digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    #[test]
    fn reference_cpf_vectors() {
        assert!(Cpf::validate("11144477735"));
        assert!(Cpf::validate("52998224725"));

        // Repeated-digit class rejected even though its checksum holds.
        assert!(!Cpf::validate("11111111111"));

        assert!(!Cpf::validate("11144477734"));
        assert!(!Cpf::validate("1114447773"));
        assert!(!Cpf::validate("111444777355"));
        assert!(!Cpf::validate("1114447773a"));
        assert!(!Cpf::validate(""));
    }

    #[test]
    fn reference_cnpj_vectors() {
        assert!(Cnpj::validate("11222333000181"));

        assert!(!Cnpj::validate("11111111111111"));
        assert!(!Cnpj::validate("11222333000182"));
        assert!(!Cnpj::validate("1122233300018"));
        assert!(!Cnpj::validate("11222333000181x"));
    }

    #[test]
    fn ni_accepts_either_shape() {
        assert!(Ni::validate("11144477735"));
        assert!(Ni::validate("11222333000181"));
        assert!(!Ni::validate("123"));
        assert!(!Ni::validate("11144477734"));
    }

    proptest! {
        #[test]
        fn generated_cpfs_validate(stem in proptest::array::uniform9(0u8..10)) {
            let cpf = cpf_from_stem(stem);
            // The generator can land on the excluded repeated-digit class.
            prop_assume!(!cpf.bytes().all(|b| b == cpf.as_bytes()[0]));
            prop_assert!(Cpf::validate(&cpf));
        }

        #[test]
        fn single_digit_mutations_fail(
            stem in proptest::array::uniform9(0u8..10),
            position in 0usize..11,
            bump in 1u8..10,
        ) {
            let cpf = cpf_from_stem(stem);
            prop_assume!(!cpf.bytes().all(|b| b == cpf.as_bytes()[0]));

            let mut mutated = cpf.into_bytes();
            mutated[position] = b'0' + (mutated[position] - b'0' + bump) % 10;
            let mutated = String::from_utf8(mutated).unwrap();

            prop_assert!(!Cpf::validate(&mutated));
        }
    }
}
