//! Admin user management: add and delete with cascading chat removal.

use crate::domain::{
    directory::{DeletedUser, Directory},
    user::{User, UserId},
};

/// Adds an offline user plus a chat with the current user. Blank names
/// are ignored.
pub fn add_user(directory: &mut Directory, name: &str) -> Option<User> {
    let user = directory.add_user(name)?;
    tracing::info!(user_id = %user.id, "user added");
    Some(user)
}

/// Removes a user and every chat they are in. The current user and
/// unknown ids are ignored.
pub fn delete_user(directory: &mut Directory, user_id: &UserId) -> Option<DeletedUser> {
    let Some(deleted) = directory.delete_user(user_id) else {
        tracing::debug!(user_id = %user_id, "delete ignored");
        return None;
    };

    tracing::info!(
        user_id = %deleted.user.id,
        removed_chats = deleted.removed_chats.len(),
        "user deleted"
    );
    Some(deleted)
}

/// Users the admin may manage: everyone except the current user.
pub fn manageable_users(directory: &Directory) -> Vec<User> {
    let current = directory.current_user_id();
    directory
        .list_users()
        .into_iter()
        .filter(|user| &user.id != current)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_delete_round_trips_collections() {
        let mut directory = Directory::new("You");

        let pat = add_user(&mut directory, "Pat").expect("pat");
        assert_eq!(directory.list_users().len(), 2);
        assert_eq!(directory.list_chats().len(), 1);

        let deleted = delete_user(&mut directory, &pat.id).expect("deleted");
        assert_eq!(deleted.removed_chats.len(), 1);
        assert_eq!(directory.list_users().len(), 1);
        assert!(directory.list_chats().is_empty());
    }

    #[test]
    fn blank_name_and_protected_user_are_noops() {
        let mut directory = Directory::new("You");
        let you = directory.current_user_id().clone();

        assert!(add_user(&mut directory, "   ").is_none());
        assert!(delete_user(&mut directory, &you).is_none());
        assert_eq!(directory.list_users().len(), 1);
    }

    #[test]
    fn manageable_users_hide_current_user() {
        let mut directory = Directory::new("You");
        add_user(&mut directory, "Alex");

        let names: Vec<_> = manageable_users(&directory)
            .into_iter()
            .map(|user| user.name)
            .collect();

        assert_eq!(names, vec!["Alex".to_owned()]);
    }
}
