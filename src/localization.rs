use std::collections::HashMap;
use std::sync::LazyLock;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use tracing::warn;
use unic_langid::langid;

/// Uzbek user-facing messages
const UZ_MESSAGES: &str = include_str!("../locales/uz/main.ftl");

/// Localization manager for the Vision Bot
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a localization manager from the compiled-in Uzbek resource
    pub fn new() -> Self {
        Self::from_source(UZ_MESSAGES)
    }

    /// Create a localization manager from Fluent source text
    ///
    /// Malformed entries are logged and skipped; the rest of the resource loads.
    pub fn from_source(source: &str) -> Self {
        let mut bundle = FluentBundle::new_concurrent(vec![langid!("uz")]);
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(errors = ?errors, "Fluent resource contains errors");
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            warn!(errors = ?errors, "Failed to add Fluent resource");
        }

        Self { bundle }
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (k, v) in args {
                fluent_args.set(*k, FluentValue::from(*v));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = self
            .bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key, errors = ?errors, "Errors while formatting message");
        }

        value.into_owned()
    }
}

impl Default for LocalizationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global localization instance
static LOCALIZATION_MANAGER: LazyLock<LocalizationManager> = LazyLock::new(LocalizationManager::new);

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION_MANAGER
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}
