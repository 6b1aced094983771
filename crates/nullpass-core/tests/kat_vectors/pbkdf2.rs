//! PBKDF2-HMAC-SHA256 derivation vectors (100 000 iterations, 32 bytes).

use nullpass_core::kdf::{derive, salt};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn canonical_derived_key() {
    assert_eq!(salt("example.com", "alice", 1), "example.comalice1");
    let entropy = derive("correct horse", "example.com", "alice", 1).unwrap();
    assert_eq!(
        hex(&entropy.to_be_bytes()),
        "123e9e1c52e0d5a5a5c0ab25cab8b970d6a7ae99a0f141a3d4c2b935d477c747"
    );
}

#[test]
fn counter_two_derived_key() {
    let entropy = derive("correct horse", "example.com", "alice", 2).unwrap();
    assert_eq!(
        hex(&entropy.to_be_bytes()),
        "528753a4fc1763d04539e8e8bb00d6d33ee314db37d92a860af9ef8daeef73dd"
    );
}

#[test]
fn hex_counter_derived_key() {
    // counter 16 renders as "10" in the salt
    assert_eq!(salt("example.com", "alice", 16), "example.comalice10");
    let entropy = derive("correct horse", "example.com", "alice", 16).unwrap();
    assert_eq!(
        hex(&entropy.to_be_bytes()),
        "29e6c213bd2d0c2c0c2e422b105f08e2a8dcab2f6c7442cec7558f5edcd9365c"
    );
}
