//! Demo data loaded at startup.

use chrono::{DateTime, Duration, Utc};

use super::{
    directory::Directory,
    message::MessageKind,
    messaging::append_message,
    user::UserId,
};

pub const CURRENT_USER_NAME: &str = "You";

/// One row of the simulated network log shown in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLogEntry {
    pub user: &'static str,
    pub site: &'static str,
    pub at: DateTime<Utc>,
}

/// Builds the demo directory: four users, four chats, and the first
/// chat selected.
pub fn demo_directory(now: DateTime<Utc>) -> Directory {
    let mut directory = Directory::new(CURRENT_USER_NAME);
    let you = directory.current_user_id().clone();

    let alex = insert(&mut directory, "Alex", true);
    let sam = insert(&mut directory, "Sam", false);
    let jess = insert(&mut directory, "Jess", true);

    let minutes = |m: i64| now - Duration::minutes(m);

    let threads: [(&UserId, &UserId, Vec<(&UserId, &str, i64)>); 4] = [
        (
            &you,
            &alex,
            vec![
                (&alex, "yo what up!", 5),
                (&you, "nm, just chillin. hostel wifi is surprisingly fast tonight", 4),
                (&alex, "fr? lets run some games", 3),
            ],
        ),
        (&you, &sam, vec![(&sam, "did you finish the assignment?", 120)]),
        (
            &you,
            &jess,
            vec![
                (&jess, "pizza party in the common room @ 9", 30),
                (&you, "omw!", 29),
            ],
        ),
        (
            &alex,
            &sam,
            vec![
                (&alex, "Hey, are you going to the jam session tonight?", 120),
                (&sam, "Yeah, I'll be there. Need to finish some work first.", 118),
                (&alex, "Cool, save me a spot!", 117),
            ],
        ),
    ];

    let mut first_chat = None;
    for (first, second, messages) in threads {
        let chat_id = match directory.open_chat(first, second) {
            Ok(chat_id) => chat_id,
            Err(error) => {
                tracing::warn!(error = %error, "skipping seed chat");
                continue;
            }
        };

        for (sender, text, ago) in messages {
            if let Err(error) = append_message(
                &mut directory,
                &chat_id,
                sender,
                text.to_owned(),
                MessageKind::Text,
                minutes(ago),
            ) {
                tracing::warn!(error = %error, "skipping seed message");
            }
        }

        first_chat.get_or_insert(chat_id);
    }

    if let Some(chat_id) = first_chat {
        directory.select_chat(&chat_id);
    }

    directory
}

/// Simulated traffic; a terminal client has no access to real logs.
pub fn demo_network_logs(now: DateTime<Utc>) -> Vec<NetworkLogEntry> {
    [
        ("Alex", "youtube.com", 5),
        ("Jess", "stackoverflow.com", 12),
        ("Sam", "github.com", 25),
        ("Alex", "google.com", 31),
        ("Jess", "docs.rs", 45),
        ("Alex", "crates.io", 52),
    ]
    .into_iter()
    .map(|(user, site, ago)| NetworkLogEntry {
        user,
        site,
        at: now - Duration::minutes(ago),
    })
    .collect()
}

fn insert(directory: &mut Directory, name: &str, is_online: bool) -> UserId {
    directory
        .insert_user(name, is_online)
        .unwrap_or_else(|| directory.current_user_id().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_directory_matches_expected_shape() {
        let directory = demo_directory(Utc::now());

        let names: Vec<_> = directory.users().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["You", "Alex", "Sam", "Jess"]);

        let counts: Vec<_> = directory.chats().map(|c| c.messages().len()).collect();
        assert_eq!(counts, [3, 1, 2, 3]);

        assert_eq!(directory.active_chat_id().map(ToString::to_string).as_deref(), Some("chat1"));
        assert_eq!(
            directory
                .user(&UserId::new("user3"))
                .map(|user| user.is_online),
            Some(false)
        );
    }

    #[test]
    fn demo_messages_are_in_timestamp_order() {
        let directory = demo_directory(Utc::now());

        for chat in directory.chats() {
            assert!(chat
                .messages()
                .windows(2)
                .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        }
    }

    #[test]
    fn network_logs_are_newest_first() {
        let logs = demo_network_logs(Utc::now());

        assert_eq!(logs.len(), 6);
        assert!(logs.windows(2).all(|pair| pair[0].at >= pair[1].at));
    }
}
