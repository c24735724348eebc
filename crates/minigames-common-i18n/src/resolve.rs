//! Locale fallback and placeholder substitution.

use crate::declare::MessageShape;
use crate::format::{ArgumentFormatter, MessageArg, PlainArguments};
use crate::store::MessageStore;
use crate::{Locale, MessageError, MessageKey};
use std::sync::Arc;
use tracing::trace;

/// Read path over a [`MessageStore`].
///
/// A key with no template anywhere on its fallback chain resolves to an
/// empty result; that is not an error.
#[derive(Clone)]
pub struct MessageResolver {
    store: Arc<MessageStore>,
    formatter: Arc<dyn ArgumentFormatter>,
}

impl MessageResolver {
    /// Resolver using [`PlainArguments`].
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self::with_formatter(store, Arc::new(PlainArguments))
    }

    /// Resolver using a host-supplied argument converter.
    pub fn with_formatter(store: Arc<MessageStore>, formatter: Arc<dyn ArgumentFormatter>) -> Self {
        Self { store, formatter }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// Player-facing lines of a multi-line message.
    ///
    /// Tries the requested locale, then the entry's default locale.
    pub fn resolve_user(
        &self,
        key: &MessageKey,
        locale: &Locale,
        args: &[MessageArg],
    ) -> Result<Vec<String>, MessageError> {
        self.expect_shape(key, MessageShape::Multi)?;
        Ok(self.user_lines(key, locale, args))
    }

    /// Operator-facing lines of a multi-line message.
    ///
    /// Tries admin then user text at the requested locale, then admin then
    /// user text at the entry's default locale.
    pub fn resolve_admin(
        &self,
        key: &MessageKey,
        locale: &Locale,
        args: &[MessageArg],
    ) -> Result<Vec<String>, MessageError> {
        self.expect_shape(key, MessageShape::Multi)?;
        Ok(self.admin_lines(key, locale, args))
    }

    /// Player-facing text of a single-line message.
    pub fn user_message(
        &self,
        key: &MessageKey,
        locale: &Locale,
        args: &[MessageArg],
    ) -> Result<String, MessageError> {
        self.expect_shape(key, MessageShape::Single)?;
        Ok(self.user_lines(key, locale, args).join("\n"))
    }

    /// Operator-facing text of a single-line message.
    pub fn admin_message(
        &self,
        key: &MessageKey,
        locale: &Locale,
        args: &[MessageArg],
    ) -> Result<String, MessageError> {
        self.expect_shape(key, MessageShape::Single)?;
        Ok(self.admin_lines(key, locale, args).join("\n"))
    }

    fn user_lines(&self, key: &MessageKey, locale: &Locale, args: &[MessageArg]) -> Vec<String> {
        let catalog = self.store.snapshot();
        let lines = catalog
            .get(key)
            .map(|entry| entry.format_user(locale, args, self.formatter.as_ref()))
            .unwrap_or_default();
        trace!(%key, %locale, lines = lines.len(), "resolved user message");
        lines
    }

    fn admin_lines(&self, key: &MessageKey, locale: &Locale, args: &[MessageArg]) -> Vec<String> {
        let catalog = self.store.snapshot();
        let lines = catalog
            .get(key)
            .map(|entry| entry.format_admin(locale, args, self.formatter.as_ref()))
            .unwrap_or_default();
        trace!(%key, %locale, lines = lines.len(), "resolved admin message");
        lines
    }

    fn expect_shape(&self, key: &MessageKey, expected: MessageShape) -> Result<(), MessageError> {
        let actual = self.store.shape(key);
        if actual == expected {
            Ok(())
        } else {
            Err(MessageError::ShapeMismatch {
                key: key.clone(),
                expected,
                actual,
            })
        }
    }
}

impl std::fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageResolver")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
