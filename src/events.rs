use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::{SettingsStore, EVENTS_KEY, SELECTED_KEY};

/// One tracked target date. `id` is an opaque token, unique by generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdayEvent {
    pub id: String,
    pub name: String,
    pub date: String,
}

/// Decode the stored event list. The caller decides what a parse failure
/// means; the policy differs between display and the mutating operations.
pub fn parse_list(json: &str) -> Result<Vec<DdayEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn find<'a>(events: &'a [DdayEvent], id: &str) -> Option<&'a DdayEvent> {
    events.iter().find(|e| e.id == id)
}

pub fn valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Syntactic date check: exactly `\d{4}-\d{2}-\d{2}`.
///
/// Not a calendar check. "2024-13-45" passes and is stored; the display
/// layer renders such entries as `D-?`.
pub fn valid_date(date: &str) -> bool {
    let b = date.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| b[i].is_ascii_digit())
}

fn save_list(store: &mut dyn SettingsStore, events: &[DdayEvent]) {
    let json = serde_json::to_string(events).expect("event list serializes");
    store.set_string(EVENTS_KEY, &json);
}

/// Append a new event. If the stored list does not parse, the new entry is
/// recorded against an empty base list rather than dropped. Adding to an
/// empty list selects the new event.
pub fn add(store: &mut dyn SettingsStore, name: &str, date: &str) -> DdayEvent {
    let mut events = match parse_list(&store.get_string(EVENTS_KEY)) {
        Ok(events) => events,
        Err(e) => {
            log::error!("stored events unreadable, starting from empty list: {e}");
            Vec::new()
        }
    };

    let event = DdayEvent {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        date: date.to_string(),
    };
    events.push(event.clone());

    if events.len() == 1 {
        store.set_string(SELECTED_KEY, &event.id);
    }
    save_list(store, &events);
    event
}

/// Replace an event's name and date in place. A missing id is a silent
/// no-op. Unlike `add`, an unreadable stored list aborts the operation.
pub fn update(store: &mut dyn SettingsStore, id: &str, name: &str, date: &str) {
    let mut events = match parse_list(&store.get_string(EVENTS_KEY)) {
        Ok(events) => events,
        Err(e) => {
            log::error!("stored events unreadable, update aborted: {e}");
            return;
        }
    };

    if let Some(event) = events.iter_mut().find(|e| e.id == id) {
        event.name = name.to_string();
        event.date = date.to_string();
        save_list(store, &events);
    }
}

/// Remove an event by id, preserving the order of the rest. Deleting the
/// selected event moves selection to the first remaining event, or clears it
/// when the list becomes empty.
pub fn delete(store: &mut dyn SettingsStore, id: &str) {
    let mut events = match parse_list(&store.get_string(EVENTS_KEY)) {
        Ok(events) => events,
        Err(e) => {
            log::error!("stored events unreadable, delete aborted: {e}");
            return;
        }
    };

    events.retain(|e| e.id != id);

    if store.get_string(SELECTED_KEY) == id {
        let next = events.first().map(|e| e.id.as_str()).unwrap_or("");
        store.set_string(SELECTED_KEY, next);
    }
    save_list(store, &events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    fn stored(store: &MemoryStore) -> Vec<DdayEvent> {
        parse_list(&store.get_string(EVENTS_KEY)).unwrap()
    }

    #[test]
    fn date_shape_check() {
        assert!(valid_date("2030-01-01"));
        assert!(valid_date("2024-13-45")); // shape only, by design
        assert!(!valid_date("2030-1-1"));
        assert!(!valid_date("2030/01/01"));
        assert!(!valid_date("2030-01-011"));
        assert!(!valid_date(""));
        assert!(!valid_date("20300101xx"));
    }

    #[test]
    fn name_must_be_non_blank() {
        assert!(valid_name("Launch"));
        assert!(!valid_name(""));
        assert!(!valid_name("   "));
    }

    #[test]
    fn add_select_delete_scenario() {
        let mut store = MemoryStore::new();

        let launch = add(&mut store, "Launch", "2030-01-01");
        let events = stored(&store);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Launch");
        assert_eq!(events[0].date, "2030-01-01");
        assert_eq!(store.get_string(SELECTED_KEY), launch.id);

        let review = add(&mut store, "Review", "2030-02-01");
        assert_eq!(stored(&store).len(), 2);
        // Second add leaves the selection alone.
        assert_eq!(store.get_string(SELECTED_KEY), launch.id);

        delete(&mut store, &launch.id);
        let events = stored(&store);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Review");
        assert_eq!(store.get_string(SELECTED_KEY), review.id);

        delete(&mut store, &review.id);
        assert!(stored(&store).is_empty());
        assert_eq!(store.get_string(SELECTED_KEY), "");
    }

    #[test]
    fn deleting_unselected_event_keeps_selection() {
        let mut store = MemoryStore::new();
        let first = add(&mut store, "A", "2030-01-01");
        let second = add(&mut store, "B", "2030-02-01");

        delete(&mut store, &second.id);
        assert_eq!(store.get_string(SELECTED_KEY), first.id);
        assert_eq!(stored(&store), vec![first]);
    }

    #[test]
    fn add_round_trips_with_delete() {
        let mut store = MemoryStore::new();
        add(&mut store, "Keep", "2030-01-01");
        let before = stored(&store);

        let temp = add(&mut store, "Temp", "2030-06-01");
        delete(&mut store, &temp.id);
        assert_eq!(stored(&store), before);
    }

    #[test]
    fn update_is_idempotent_and_order_preserving() {
        let mut store = MemoryStore::new();
        let a = add(&mut store, "A", "2030-01-01");
        let b = add(&mut store, "B", "2030-02-01");

        update(&mut store, &a.id, "A2", "2031-01-01");
        let once = stored(&store);
        update(&mut store, &a.id, "A2", "2031-01-01");
        assert_eq!(stored(&store), once);

        assert_eq!(once[0].id, a.id);
        assert_eq!(once[0].name, "A2");
        assert_eq!(once[0].date, "2031-01-01");
        assert_eq!(once[1], b);
    }

    #[test]
    fn update_missing_id_is_silent_noop() {
        let mut store = MemoryStore::new();
        add(&mut store, "A", "2030-01-01");
        let before = stored(&store);
        store.take_changes();

        update(&mut store, "no-such-id", "X", "2031-01-01");
        assert_eq!(stored(&store), before);
        assert!(store.take_changes().is_empty());
    }

    #[test]
    fn add_survives_corrupt_stored_list() {
        let mut store = MemoryStore::new();
        store.set_string(EVENTS_KEY, "not json");

        let event = add(&mut store, "Fresh", "2030-01-01");
        let events = stored(&store);
        assert_eq!(events, vec![event.clone()]);
        // First entry of the recovered list gets auto-selected.
        assert_eq!(store.get_string(SELECTED_KEY), event.id);
    }

    #[test]
    fn update_and_delete_abort_on_corrupt_stored_list() {
        let mut store = MemoryStore::new();
        store.set_string(EVENTS_KEY, "not json");
        store.take_changes();

        update(&mut store, "any", "X", "2030-01-01");
        delete(&mut store, "any");

        assert_eq!(store.get_string(EVENTS_KEY), "not json");
        assert!(store.take_changes().is_empty());
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut store = MemoryStore::new();
        let a = add(&mut store, "A", "2030-01-01");
        let b = add(&mut store, "A", "2030-01-01");
        assert_ne!(a.id, b.id);
    }
}
