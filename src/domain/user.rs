use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A registered account. Only the salted hash of the password is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique across all users, compared exactly as stored
    pub email: String,
    /// PHC-formatted hash string; embeds algorithm, parameters and salt
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: 7,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password_hash").is_none());
    }
}
