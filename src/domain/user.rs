use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chat participant. The id never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Simulated presence flag, there is no transport behind it.
    pub is_online: bool,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, is_online: bool) -> Self {
        let name = name.into();
        let avatar = placeholder_avatar(&name);

        Self {
            id,
            name,
            avatar,
            is_online,
        }
    }
}

/// Deterministic avatar reference derived from the display name.
pub fn placeholder_avatar(name: &str) -> String {
    format!("https://picsum.photos/seed/{name}/100/100")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_seeded_by_name() {
        let user = User::new(UserId::new("user9"), "Pat", false);

        assert_eq!(user.avatar, "https://picsum.photos/seed/Pat/100/100");
        assert_eq!(user.avatar, placeholder_avatar("Pat"));
    }

    #[test]
    fn user_id_displays_raw_value() {
        assert_eq!(UserId::new("user1").to_string(), "user1");
    }
}
