//! In-memory user and chat collections.

use std::collections::HashMap;

use thiserror::Error;

use super::{
    chat::{Chat, ChatId},
    message::MessageId,
    user::{User, UserId},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("unknown user {0}")]
    UnknownUser(UserId),
    #[error("a chat needs two distinct participants")]
    SelfChat,
}

/// Outcome of a successful `delete_user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUser {
    pub user: User,
    pub removed_chats: Vec<ChatId>,
}

/// Sequential id source shared by every entity in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IdAllocator {
    next_user: u64,
    next_chat: u64,
    next_message: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_user: 1,
            next_chat: 1,
            next_message: 1,
        }
    }
}

impl IdAllocator {
    fn user(&mut self) -> UserId {
        let id = UserId::new(format!("user{}", self.next_user));
        self.next_user += 1;
        id
    }

    fn chat(&mut self) -> ChatId {
        let id = ChatId::new(format!("chat{}", self.next_chat));
        self.next_chat += 1;
        id
    }

    fn message(&mut self) -> MessageId {
        let id = MessageId::new(format!("msg{}", self.next_message));
        self.next_message += 1;
        id
    }
}

/// Owns every user and chat. Lists keep insertion order; lookups go
/// through the id maps and return `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    current_user_id: UserId,
    users: HashMap<UserId, User>,
    user_order: Vec<UserId>,
    chats: HashMap<ChatId, Chat>,
    chat_order: Vec<ChatId>,
    active_chat_id: Option<ChatId>,
    ids: IdAllocator,
}

impl Directory {
    /// Creates a directory holding only the protected current user.
    pub fn new(current_user_name: &str) -> Self {
        let mut ids = IdAllocator::default();
        let current = User::new(ids.user(), current_user_name, true);
        let current_user_id = current.id.clone();

        Self {
            current_user_id: current_user_id.clone(),
            users: HashMap::from([(current_user_id.clone(), current)]),
            user_order: vec![current_user_id],
            chats: HashMap::new(),
            chat_order: Vec::new(),
            active_chat_id: None,
            ids,
        }
    }

    pub fn current_user_id(&self) -> &UserId {
        &self.current_user_id
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn chat(&self, id: &ChatId) -> Option<&Chat> {
        self.chats.get(id)
    }

    pub(crate) fn chat_mut(&mut self, id: &ChatId) -> Option<&mut Chat> {
        self.chats.get_mut(id)
    }

    /// Users in insertion order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.user_order.iter().filter_map(|id| self.users.get(id))
    }

    /// Chats in insertion order.
    pub fn chats(&self) -> impl Iterator<Item = &Chat> {
        self.chat_order.iter().filter_map(|id| self.chats.get(id))
    }

    pub fn list_users(&self) -> Vec<User> {
        self.users().cloned().collect()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn list_chats(&self) -> Vec<Chat> {
        self.chats().cloned().collect()
    }

    pub fn active_chat_id(&self) -> Option<&ChatId> {
        self.active_chat_id.as_ref()
    }

    pub fn active_chat(&self) -> Option<&Chat> {
        self.active_chat_id.as_ref().and_then(|id| self.chats.get(id))
    }

    /// Returns false if the chat does not exist.
    pub fn select_chat(&mut self, id: &ChatId) -> bool {
        if !self.chats.contains_key(id) {
            return false;
        }

        self.active_chat_id = Some(id.clone());
        true
    }

    /// Inserts a user without opening any chat. Empty names are ignored.
    pub(crate) fn insert_user(&mut self, name: &str, is_online: bool) -> Option<UserId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let user = User::new(self.ids.user(), name, is_online);
        let id = user.id.clone();
        self.users.insert(id.clone(), user);
        self.user_order.push(id.clone());

        Some(id)
    }

    /// Opens an empty chat between two existing, distinct users.
    pub fn open_chat(&mut self, first: &UserId, second: &UserId) -> Result<ChatId, DirectoryError> {
        for id in [first, second] {
            if !self.users.contains_key(id) {
                return Err(DirectoryError::UnknownUser(id.clone()));
            }
        }
        if first == second {
            return Err(DirectoryError::SelfChat);
        }

        let chat = Chat::new(self.ids.chat(), first.clone(), second.clone())
            .ok_or(DirectoryError::SelfChat)?;
        let id = chat.id().clone();
        self.chats.insert(id.clone(), chat);
        self.chat_order.push(id.clone());

        Ok(id)
    }

    /// Adds an offline user and a chat pairing them with the current
    /// user. Empty or whitespace-only names are a no-op.
    pub fn add_user(&mut self, name: &str) -> Option<User> {
        let id = self.insert_user(name, false)?;
        let current = self.current_user_id.clone();

        if let Err(error) = self.open_chat(&current, &id) {
            tracing::warn!(error = %error, user_id = %id, "new user chat could not be opened");
        }

        self.users.get(&id).cloned()
    }

    /// Removes a user and every chat they take part in.
    ///
    /// Deleting the current user or an unknown id is a no-op. When the
    /// active chat goes away the selection falls back to the first
    /// remaining chat, or none.
    pub fn delete_user(&mut self, id: &UserId) -> Option<DeletedUser> {
        if *id == self.current_user_id {
            return None;
        }

        let user = self.users.remove(id)?;
        self.user_order.retain(|existing| existing != id);

        let removed_chats: Vec<ChatId> = self
            .chats()
            .filter(|chat| chat.involves(id))
            .map(|chat| chat.id().clone())
            .collect();

        for chat_id in &removed_chats {
            self.chats.remove(chat_id);
        }
        self.chat_order.retain(|chat_id| !removed_chats.contains(chat_id));

        let active_removed = self
            .active_chat_id
            .as_ref()
            .is_some_and(|active| removed_chats.contains(active));
        if active_removed {
            self.active_chat_id = self.chat_order.first().cloned();
        }

        Some(DeletedUser {
            user,
            removed_chats,
        })
    }

    pub(crate) fn allocate_message_id(&mut self) -> MessageId {
        self.ids.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with(names: &[&str]) -> (Directory, Vec<UserId>) {
        let mut directory = Directory::new("You");
        let ids = names
            .iter()
            .map(|name| directory.add_user(name).expect("user added").id)
            .collect();
        (directory, ids)
    }

    #[test]
    fn new_directory_holds_only_current_user() {
        let directory = Directory::new("You");

        assert_eq!(directory.current_user_id().to_string(), "user1");
        assert_eq!(directory.list_users().len(), 1);
        assert!(directory.list_chats().is_empty());
        assert_eq!(directory.active_chat_id(), None);
    }

    #[test]
    fn add_user_adds_one_user_and_one_chat_with_current_user() {
        let mut directory = Directory::new("You");

        let user = directory.add_user("Pat").expect("user added");

        assert_eq!(directory.list_users().len(), 2);
        assert_eq!(directory.list_chats().len(), 1);
        assert!(!user.is_online);
        assert_eq!(user.name, "Pat");

        let chat = &directory.list_chats()[0];
        assert!(chat.involves(directory.current_user_id()));
        assert!(chat.involves(&user.id));
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn add_user_trims_name_and_ignores_blank_names() {
        let mut directory = Directory::new("You");

        assert!(directory.add_user("").is_none());
        assert!(directory.add_user("   \t").is_none());
        assert_eq!(directory.list_users().len(), 1);
        assert!(directory.list_chats().is_empty());

        let user = directory.add_user("  Pat ").expect("user added");
        assert_eq!(user.name, "Pat");
    }

    #[test]
    fn ids_are_unique_across_adds() {
        let (directory, ids) = directory_with(&["A", "B", "C"]);

        let mut all: Vec<_> = directory.users().map(|u| u.id.clone()).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 4);
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn lists_keep_insertion_order() {
        let (directory, _) = directory_with(&["Zed", "Amy"]);

        let names: Vec<_> = directory.users().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["You", "Zed", "Amy"]);
    }

    #[test]
    fn deleting_current_user_is_a_noop() {
        let (mut directory, _) = directory_with(&["Alex"]);
        let before = directory.clone();
        let current = directory.current_user_id().clone();

        assert!(directory.delete_user(&current).is_none());
        assert_eq!(directory, before);
    }

    #[test]
    fn deleting_unknown_user_is_a_noop() {
        let (mut directory, _) = directory_with(&["Alex"]);
        let before = directory.clone();

        assert!(directory.delete_user(&UserId::new("nobody")).is_none());
        assert_eq!(directory, before);
    }

    #[test]
    fn delete_user_cascades_to_exactly_their_chats() {
        let (mut directory, ids) = directory_with(&["Alex", "Sam", "Jess"]);
        let (alex, sam) = (ids[0].clone(), ids[1].clone());
        let alex_sam = directory.open_chat(&alex, &sam).expect("chat opened");

        let deleted = directory.delete_user(&alex).expect("alex deleted");

        assert_eq!(deleted.user.name, "Alex");
        assert_eq!(deleted.removed_chats.len(), 2);
        assert!(deleted.removed_chats.contains(&alex_sam));
        assert!(directory.user(&alex).is_none());
        assert!(directory.chats().all(|chat| !chat.involves(&alex)));
        assert_eq!(directory.list_chats().len(), 2);
    }

    #[test]
    fn deleting_active_chat_falls_back_to_first_remaining() {
        let (mut directory, ids) = directory_with(&["Alex", "Sam"]);
        let alex_chat = directory
            .chats()
            .find(|chat| chat.involves(&ids[0]))
            .map(|chat| chat.id().clone())
            .expect("alex chat");
        let sam_chat = directory
            .chats()
            .find(|chat| chat.involves(&ids[1]))
            .map(|chat| chat.id().clone())
            .expect("sam chat");
        directory.select_chat(&alex_chat);

        directory.delete_user(&ids[0]);

        assert_eq!(directory.active_chat_id(), Some(&sam_chat));

        directory.delete_user(&ids[1]);
        assert_eq!(directory.active_chat_id(), None);
    }

    #[test]
    fn deleting_other_user_keeps_active_chat() {
        let (mut directory, ids) = directory_with(&["Alex", "Sam"]);
        let sam_chat = directory
            .chats()
            .find(|chat| chat.involves(&ids[1]))
            .map(|chat| chat.id().clone())
            .expect("sam chat");
        directory.select_chat(&sam_chat);

        directory.delete_user(&ids[0]);

        assert_eq!(directory.active_chat_id(), Some(&sam_chat));
    }

    #[test]
    fn open_chat_validates_participants() {
        let (mut directory, ids) = directory_with(&["Alex"]);

        assert_eq!(
            directory.open_chat(&ids[0], &UserId::new("ghost")),
            Err(DirectoryError::UnknownUser(UserId::new("ghost")))
        );
        assert_eq!(
            directory.open_chat(&ids[0], &ids[0]),
            Err(DirectoryError::SelfChat)
        );
    }

    #[test]
    fn select_chat_rejects_unknown_id() {
        let mut directory = Directory::new("You");

        assert!(!directory.select_chat(&ChatId::new("chat99")));
        assert_eq!(directory.active_chat_id(), None);
    }
}
