use std::cell::Cell;

use psyexam_auth::password::{hash_password, verify_login, verify_login_with, verify_password};
use psyexam_auth::session::{
    token_from_cookie_header, CookieSettings, SessionKeys, COOKIE_NAME, SESSION_TTL_SECS,
};

#[test]
fn password_hash_verifies_only_the_hashed_password() {
    let hash = hash_password("correct horse").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("correct horse", &hash));
    assert!(!verify_password("wrong horse", &hash));
}

#[test]
fn malformed_stored_hash_never_verifies() {
    assert!(!verify_password("anything", "not-a-phc-string"));
}

#[test]
fn unknown_account_runs_the_verifier_and_fails() {
    let calls = Cell::new(0);
    let counting = |password: &str, hash: &str| {
        calls.set(calls.get() + 1);
        verify_password(password, hash)
    };

    assert!(!verify_login_with("correct horse", None, counting));
    assert_eq!(calls.get(), 1);

    let hash = hash_password("correct horse").unwrap();
    assert!(!verify_login_with("wrong horse", Some(&hash), counting));
    assert!(verify_login_with("correct horse", Some(&hash), counting));
    assert_eq!(calls.get(), 3);
}

#[test]
fn unknown_account_checks_a_real_argon2_hash() {
    let seen = Cell::new(String::new());
    verify_login_with("unknown-account", None, |_, hash| {
        seen.set(hash.to_string());
        false
    });
    assert!(seen.take().starts_with("$argon2"));
    assert!(!verify_login("unknown-account", None));
}

#[test]
fn issued_token_verifies_with_thirty_day_expiry() {
    let keys = SessionKeys::new(b"test-secret");
    let token = keys.issue(42).unwrap();

    let claims = keys.verify(&token).unwrap();
    assert_eq!(claims.sub, 42);
    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
}

#[test]
fn token_signed_with_another_secret_is_rejected() {
    let token = SessionKeys::new(b"secret-a").issue(1).unwrap();
    assert!(SessionKeys::new(b"secret-b").verify(&token).is_err());
}

#[test]
fn expired_token_is_rejected() {
    let keys = SessionKeys::new(b"test-secret");
    let long_ago = jiff::Timestamp::from_second(1_000_000_000).unwrap();
    let token = keys.issue_at(1, long_ago).unwrap();
    assert!(keys.verify(&token).is_err());
}

#[test]
fn garbage_token_is_rejected() {
    let keys = SessionKeys::new(b"test-secret");
    assert!(keys.verify("not.a.token").is_err());
    assert!(keys.verify("").is_err());
}

#[test]
fn session_cookie_attributes() {
    let settings = CookieSettings {
        domain: Some("clinic.example".to_string()),
        secure: true,
    };
    let cookie = settings.session_cookie("abc");

    assert!(cookie.starts_with(&format!("{COOKIE_NAME}=abc;")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains(&format!("Max-Age={SESSION_TTL_SECS}")));
    assert!(cookie.contains("Domain=clinic.example"));
    assert!(cookie.ends_with("Secure"));
}

#[test]
fn clearing_cookie_expires_it() {
    let cookie = CookieSettings::default().clear_cookie();
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}=;")));
    assert!(cookie.contains("Max-Age=0"));
    assert!(!cookie.contains("Secure"));
    assert!(!cookie.contains("Domain"));
}

#[test]
fn token_is_found_among_other_cookies() {
    assert_eq!(
        token_from_cookie_header("theme=dark; psyexam_session=tok.en.value; lang=en"),
        Some("tok.en.value")
    );
    assert_eq!(token_from_cookie_header("theme=dark"), None);
    assert_eq!(token_from_cookie_header("psyexam_session="), None);
}
