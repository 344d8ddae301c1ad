use serde::Serialize;

/// A registered account as held by the store.
///
/// `password_hash` is a bcrypt hash; the plaintext never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
