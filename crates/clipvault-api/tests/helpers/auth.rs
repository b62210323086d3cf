use super::TEST_JWT_SECRET;
use clipvault_api::auth::make_jwt;
use uuid::Uuid;

/// A user with a valid access token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn create_test_user() -> TestUser {
    let user_id = Uuid::new_v4();
    let token = make_jwt(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("Failed to sign test token");
    TestUser { user_id, token }
}

/// Token signed with a secret the server does not know.
pub fn foreign_token() -> String {
    make_jwt(Uuid::new_v4(), "some-other-secret", chrono::Duration::hours(1))
        .expect("Failed to sign test token")
}
