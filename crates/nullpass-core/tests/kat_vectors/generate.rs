//! End-to-end password vectors.

use nullpass_core::{generate_password, Policy};

const SITE: &str = "example.com";
const SECRET: &str = "correct horse";

fn only(lowercase: bool, uppercase: bool, digits: bool, symbols: bool) -> Policy {
    Policy {
        lowercase,
        uppercase,
        digits,
        symbols,
        ..Policy::default()
    }
}

#[test]
fn canonical_vector() {
    let pw = generate_password(SITE, "alice", SECRET, &Policy::default()).unwrap();
    assert_eq!(pw, r##"<+"qhcNXO}"H"7zJ"##);
}

#[test]
fn exclude_vowels() {
    let policy = Policy {
        exclude: "aeiou".into(),
        ..Policy::default()
    };
    let pw = generate_password(SITE, "alice", SECRET, &policy).unwrap();
    assert_eq!(pw, r##"?Z<.r.MQk;%P?7t4"##);
}

#[test]
fn counter_two() {
    let policy = Policy {
        counter: 2,
        ..Policy::default()
    };
    let pw = generate_password(SITE, "alice", SECRET, &policy).unwrap();
    assert_eq!(pw, r##":!"Gp9+SD}wc5E{v"##);
}

#[test]
fn different_login() {
    let pw = generate_password(SITE, "bob", SECRET, &Policy::default()).unwrap();
    assert_eq!(pw, r##"B{yvs\\2GEHAW;yL"##);
}

#[test]
fn empty_login_minimum_length() {
    let policy = Policy {
        length: 5,
        ..Policy::default()
    };
    let pw = generate_password(SITE, "", SECRET, &policy).unwrap();
    assert_eq!(pw, "1z8*M");
}

#[test]
fn maximum_length() {
    let policy = Policy {
        length: 35,
        ..Policy::default()
    };
    let pw = generate_password(SITE, "alice", SECRET, &policy).unwrap();
    assert_eq!(pw, r##"<+qhc=4XOd}"YH"JnZ#|C>.V4VGq1Y*JbX\"##);
}

#[test]
fn digits_only() {
    let policy = Policy {
        length: 8,
        ..only(false, false, true, false)
    };
    let pw = generate_password(SITE, "alice", SECRET, &policy).unwrap();
    assert_eq!(pw, "51203288");
}

#[test]
fn lowercase_digits_hex_counter() {
    let policy = Policy {
        length: 12,
        counter: 16,
        ..only(true, false, true, false)
    };
    let pw = generate_password(SITE, "alice", SECRET, &policy).unwrap();
    assert_eq!(pw, "yjqqo06iuqde");
}
