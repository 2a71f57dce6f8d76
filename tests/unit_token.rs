use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use bookshelf_auth::{Claims, TokenError, issue_token, verify_token};
use bookshelf_config::TokenConfig;

fn test_config() -> TokenConfig {
    TokenConfig {
        secret: "unit-test-secret".to_string(),
        session_ttl: 86_400,
        remember_me_ttl: 31_536_000,
    }
}

#[test]
fn issued_token_verifies_to_its_subject() {
    let config = test_config();
    let subject = Uuid::new_v4();

    let token = issue_token(subject, config.session_ttl, &config).unwrap();
    assert_eq!(verify_token(&token, &config).unwrap(), subject);
}

#[test]
fn garbage_is_invalid() {
    let config = test_config();
    assert!(matches!(
        verify_token("not-a-token", &config),
        Err(TokenError::Invalid)
    ));
}

#[test]
fn wrong_secret_is_invalid() {
    let config = test_config();
    let other = TokenConfig {
        secret: "a-different-secret".to_string(),
        ..test_config()
    };

    let token = issue_token(Uuid::new_v4(), config.session_ttl, &config).unwrap();
    assert!(matches!(
        verify_token(&token, &other),
        Err(TokenError::Invalid)
    ));
}

#[test]
fn tampered_token_is_invalid() {
    let config = test_config();
    let token = issue_token(Uuid::new_v4(), config.session_ttl, &config).unwrap();

    // Flip a character in the payload section.
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let payload = &mut parts[1];
    let flipped = if payload.ends_with('A') { "B" } else { "A" };
    payload.truncate(payload.len() - 1);
    payload.push_str(flipped);

    assert!(matches!(
        verify_token(&parts.join("."), &config),
        Err(TokenError::Invalid)
    ));
}

#[test]
fn expired_token_is_invalid_and_indistinguishable() {
    let config = test_config();
    let now = chrono::Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        iat: now - 7_200,
        exp: now - 3_600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    // Same opaque error as a forged token.
    assert!(matches!(
        verify_token(&token, &config),
        Err(TokenError::Invalid)
    ));
}

#[test]
fn non_uuid_subject_is_invalid() {
    let config = test_config();
    let now = chrono::Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "admin".to_string(),
        iat: now,
        exp: now + 3_600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(matches!(
        verify_token(&token, &config),
        Err(TokenError::Invalid)
    ));
}
