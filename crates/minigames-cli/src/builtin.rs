//! Messages shipped by the framework itself.

use minigames_common_i18n::MessageDefaults;

/// Namespace of the framework's own messages.
pub const NAMESPACE: &str = "common";

/// Declarations of the `common` namespace.
pub fn defaults() -> MessageDefaults {
    let mut defaults = MessageDefaults::new();
    defaults
        .namespace(NAMESPACE, "en")
        .single("InfoMinigamesHeader", "Installed minigames (%s <page> for more)")
        .single_with_admin("InfoMinigamesLine", "%s - %s", "%s (%s)")
        .single_with_admin(
            "NoPermission",
            "You are not allowed to do that.",
            "Missing permission %s",
        )
        .multi("CommandUsage", &["Usage: %s", "Type %s help for details."]);
    defaults
}
