//! Persistence behavior of the location history and prompt-state stores.

mod test_utils;

use test_utils::temp_stores;
use wslgate::history::LocationHistory;
use wslgate::state::PromptState;

mod history {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, _state, history) = temp_stores();
        assert!(history.entries().unwrap().is_empty());
    }

    #[test]
    fn add_then_read_round_trips() {
        let (_dir, _state, history) = temp_stores();
        history.add("wsl+Ubuntu", "/home/me/a").unwrap();
        history.add("wsl+Debian", "/home/me/b").unwrap();

        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.authority == "wsl+Ubuntu"));
        assert!(entries.iter().any(|e| e.authority == "wsl+Debian"));
    }

    #[test]
    fn same_key_updates_instead_of_duplicating() {
        let (_dir, _state, history) = temp_stores();
        history.add("wsl+Ubuntu", "/home/me/a").unwrap();
        let first = history.entries().unwrap()[0].last_accessed;

        history.add("wsl+Ubuntu", "/home/me/a").unwrap();
        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].last_accessed >= first);
    }

    #[test]
    fn same_path_in_another_distro_is_a_distinct_entry() {
        let (_dir, _state, history) = temp_stores();
        history.add("wsl+Ubuntu", "/home/me/a").unwrap();
        history.add("wsl+Debian", "/home/me/a").unwrap();
        assert_eq!(history.entries().unwrap().len(), 2);
    }

    #[test]
    fn entries_are_most_recent_first() {
        let (_dir, _state, history) = temp_stores();
        history.add("wsl+Ubuntu", "/old").unwrap();
        history.add("wsl+Ubuntu", "/new").unwrap();
        history.add("wsl+Ubuntu", "/old").unwrap();

        let entries = history.entries().unwrap();
        assert_eq!(entries[0].path, "/old");
    }

    #[test]
    fn survives_reopen_from_the_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");

        LocationHistory::at_path(path.clone())
            .add("wsl+Ubuntu", "/home/me/a")
            .unwrap();

        let reopened = LocationHistory::at_path(path);
        assert_eq!(reopened.entries().unwrap().len(), 1);
    }
}

mod prompt_state {
    use super::*;

    #[test]
    fn defaults_to_not_prompted() {
        let (_dir, state, _history) = temp_stores();
        assert!(!state.env_prompted());
    }

    #[test]
    fn flag_round_trips_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = PromptState::at_path(path.clone());
        state.set_env_prompted(true).unwrap();
        assert!(state.env_prompted());

        let reopened = PromptState::at_path(path);
        assert!(reopened.env_prompted());

        reopened.set_env_prompted(false).unwrap();
        assert!(!state.env_prompted());
    }

    #[test]
    fn corrupt_state_file_reads_as_not_prompted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let state = PromptState::at_path(path);
        assert!(!state.env_prompted());
    }
}
