//! Client-side reference profile storage.
//!
//! CLI invocations are separate processes, so the active reference profile
//! (the sample-plus-transcript pair the service conditions synthesis on) is
//! persisted as JSON under the user's home directory.

mod store;

pub use store::{ProfileError, ProfileStore, ReferenceProfile};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_profile() -> ReferenceProfile {
        ReferenceProfile {
            audio_path: "samples/reference.wav".to_string(),
            text_path: "samples/reference.txt".to_string(),
            transcript: "Hello world".to_string(),
            submitted: false,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_store_default_directory() {
        let store = ProfileStore::new();
        let expected = dirs::home_dir().unwrap().join(".voicelab");
        assert_eq!(store.data_dir(), expected);
    }

    #[test]
    fn test_load_without_profile_is_no_active_profile() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::with_dir(temp_dir.path().to_path_buf());

        let result = store.load();
        assert!(matches!(result, Err(ProfileError::NoActiveProfile)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::with_dir(temp_dir.path().to_path_buf());

        store.save(&sample_profile()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_profile());
        assert!(!loaded.submitted);
    }

    #[test]
    fn test_save_replaces_previous_profile() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::with_dir(temp_dir.path().to_path_buf());

        let mut first = sample_profile();
        first.submitted = true;
        store.save(&first).unwrap();

        // A fresh upload starts over as unsubmitted.
        let second = sample_profile();
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.submitted);
    }

    #[test]
    fn test_clear_discards_profile() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::with_dir(temp_dir.path().to_path_buf());

        store.save(&sample_profile()).unwrap();
        store.clear().unwrap();

        assert!(matches!(store.load(), Err(ProfileError::NoActiveProfile)));
    }

    #[test]
    fn test_clear_without_profile_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::with_dir(temp_dir.path().to_path_buf());

        assert!(store.clear().is_ok());
    }
}
