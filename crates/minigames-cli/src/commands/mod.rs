//! Command implementations.

mod init;
mod list;
mod set;
mod show;
mod unset;

pub use init::{InitCommand, InitOutput};
pub use list::{ListCommand, ListEntry, ListOutput};
pub use set::SetCommand;
pub use show::{parse_arg, ShowCommand, ShowOutput};
pub use unset::UnsetCommand;

use minigames_common_i18n::{Channel, MessageKey, MessageStore};

/// Parse a `namespace.Name` key argument.
pub(crate) fn parse_key(value: &str) -> Result<MessageKey, String> {
    MessageKey::parse(value).ok_or_else(|| format!("expected <namespace>.<name>, got {value:?}"))
}

pub(crate) fn channel(admin: bool) -> Channel {
    if admin {
        Channel::Admin
    } else {
        Channel::User
    }
}

/// Known keys that look like `key`, for not-found errors.
pub(crate) fn similar_keys(store: &MessageStore, key: &MessageKey) -> Vec<String> {
    let wanted = key.name().to_lowercase();
    store
        .snapshot()
        .keys()
        .filter(|candidate| {
            let name = candidate.name().to_lowercase();
            name.contains(&wanted) || wanted.contains(&name) || candidate.namespace() == key.namespace()
        })
        .take(5)
        .map(|candidate| candidate.path())
        .collect()
}
