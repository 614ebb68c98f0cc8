//! Validation rules over generated inputs

use hostforge::form::validate::{validate_field, STORAGE_INVALID, STORAGE_REQUIRED, OWNER_REQUIRED};
use hostforge::models::deploy::Field;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_- .!é";

/// Reference check written without regex
fn is_storage_name(s: &str) -> bool {
    (3..=24).contains(&s.len()) && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn is_owner(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Deterministic pseudo-random strings over `ALPHABET`
fn samples() -> Vec<String> {
    let chars: Vec<char> = ALPHABET.chars().collect();
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut out = Vec::new();
    for len in 0..30 {
        for _ in 0..40 {
            let s: String = (0..len)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 7;
                    seed ^= seed << 17;
                    chars[(seed % chars.len() as u64) as usize]
                })
                .collect();
            out.push(s);
        }
    }
    // Biased towards valid storage names so both sides are exercised
    for len in 0..30 {
        out.push("a1".repeat(len).chars().take(len).collect());
    }
    out
}

#[test]
fn test_storage_account_name_matches_pattern() {
    for s in samples() {
        assert_eq!(
            validate_field(Field::StorageAccountName, &s).valid,
            is_storage_name(&s),
            "storage account name {:?}",
            s
        );
    }
}

#[test]
fn test_owner_matches_pattern() {
    for s in samples() {
        assert_eq!(validate_field(Field::Owner, &s).valid, is_owner(&s), "owner {:?}", s);
    }
}

#[test]
fn test_boundary_storage_names() {
    assert!(validate_field(Field::StorageAccountName, "abc").valid);
    assert!(validate_field(Field::StorageAccountName, &"z".repeat(24)).valid);
    assert_eq!(
        validate_field(Field::StorageAccountName, &"z".repeat(25)).message.as_deref(),
        Some(STORAGE_INVALID)
    );
    assert_eq!(
        validate_field(Field::StorageAccountName, "").message.as_deref(),
        Some(STORAGE_REQUIRED)
    );
    // Not trimmed: surrounding whitespace is an invalid character
    assert!(!validate_field(Field::StorageAccountName, " abc ").valid);
}

#[test]
fn test_empty_owner_is_required() {
    assert_eq!(validate_field(Field::Owner, "").message.as_deref(), Some(OWNER_REQUIRED));
}
