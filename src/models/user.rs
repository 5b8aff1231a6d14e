use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Recruiter,
    #[serde(rename = "Read Only")]
    ReadOnly,
}

/// An operator of the system. Recruiters only see candidates they own;
/// read-only users see the admin view but cannot mutate anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub initials: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4().to_string(),
            initials: initials_for(&name),
            name,
            email: email.into(),
            role,
        }
    }
}

/// Two-letter display tag: first letter of each word, capped at two.
pub fn initials_for(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}
