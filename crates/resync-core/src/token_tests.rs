use crate::token::{Token, TokenKind};

#[test]
fn kinds_fit_in_a_byte_and_keep_order() {
    assert_eq!(TokenKind::EndMarker.id(), 0);
    assert_eq!(TokenKind::Name.id(), 1);
    assert_eq!(TokenKind::Indent.id(), 5);
    assert!(TokenKind::ALL.len() < 256);
    for (index, kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(kind.id() as usize, index);
    }
}

#[test]
fn names_round_trip() {
    for &kind in TokenKind::ALL {
        assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(TokenKind::from_name("NOPE"), None);
}

#[test]
fn operator_lookup() {
    assert_eq!(TokenKind::from_operator(b"+"), Some(TokenKind::Plus));
    assert_eq!(TokenKind::from_operator(b"**="), Some(TokenKind::DoubleStarEqual));
    assert_eq!(TokenKind::from_operator(b"<>"), Some(TokenKind::NotEqual));
    assert_eq!(TokenKind::from_operator(b"!="), Some(TokenKind::NotEqual));
    assert_eq!(TokenKind::from_operator(b"$"), None);
}

#[test]
fn recovery_only_kinds() {
    assert!(TokenKind::FakeSuite.is_recovery_only());
    assert!(TokenKind::FakeSuiteStart.is_recovery_only());
    assert!(!TokenKind::Indent.is_recovery_only());
}

#[test]
fn display() {
    let name = Token::new(TokenKind::Name, "spam", 3, 4, "spam = 1\n".into());
    let newline = Token::new(TokenKind::Newline, "", 3, 8, "spam = 1\n".into());

    assert_eq!(name.to_string(), r#"NAME "spam""#);
    assert_eq!(newline.to_string(), "NEWLINE");
    assert!(!name.is_synthetic());
    assert!(Token::synthetic(TokenKind::Colon, "fake").is_synthetic());
}
