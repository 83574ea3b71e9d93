//! # Localization Tests
//!
//! Message retrieval from the compiled-in Uzbek resource.

use std::collections::HashMap;

use vision_bot::localization::{t, LocalizationManager};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_conversation_texts() {
        let manager = LocalizationManager::new();

        assert_eq!(
            manager.get_message("greeting", None),
            "Salom! Mening ismim Vision Bot. Menga fotosurat yuboring, men buni siz uchun tasvirlab beraman!"
        );
        assert_eq!(
            manager.get_message("farewell", None),
            "Xayr! Umid qilamanki, bir kun yana gaplashamiz."
        );
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = LocalizationManager::new();

        let message = manager.get_message("nonexistent-key", None);
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_error_messages_exist() {
        for key in [
            "photo-missing",
            "error-download-failed",
            "error-unsupported-format",
            "error-image-storage",
            "error-model-failed",
            "error-blocked",
            "error-empty-response",
        ] {
            let message = t(key);
            assert!(!message.is_empty());
            assert!(!message.starts_with("Missing"), "{key}: {message}");
        }
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = LocalizationManager::from_source("photo-count = { $count } ta fotosurat\n");

        let mut args = HashMap::new();
        args.insert("count", "3");

        assert_eq!(manager.get_message("photo-count", Some(&args)), "3 ta fotosurat");
    }

    #[test]
    fn test_malformed_source_keeps_valid_entries() {
        let manager = LocalizationManager::from_source("good = Yaxshi\nbad = { \n");

        assert_eq!(manager.get_message("good", None), "Yaxshi");
        assert!(manager.get_message("bad", None).starts_with("Missing"));
    }
}
