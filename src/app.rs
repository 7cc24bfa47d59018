use chrono::Local;

use crate::components::event_form::{FormMode, FormState};
use crate::components::PanelPosition;
use crate::events::{self, DdayEvent};
use crate::settings::{SettingsStore, EVENTS_KEY, INDEX_KEY, POSITION_KEY, SELECTED_KEY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Menu,
    Form,
    Confirm,
}

/// What the panel label shows, resolved from the store on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Countdown(String),
    /// Empty or dangling `selected-event-id`.
    NoSelection,
    /// The stored event list did not parse.
    Corrupt,
}

impl DisplayState {
    pub fn label(&self) -> &str {
        match self {
            DisplayState::Countdown(text) => text,
            DisplayState::NoSelection => "No D-Day",
            DisplayState::Corrupt => "Error",
        }
    }
}

/// Application state. Everything persistent lives in the settings store;
/// the fields here are a transient cache rebuilt by [`refresh`]. User
/// actions write to the store and rely on the drained change notifications
/// to repaint.
///
/// [`refresh`]: App::refresh
pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub events: Vec<DdayEvent>,
    pub selected_id: String,
    pub display: DisplayState,
    pub panel_position: PanelPosition,
    pub panel_index: i64,
    pub menu_cursor: usize,
    pub form: Option<FormState>,
    pub pending_delete: Option<DdayEvent>,
    pub show_help: bool,
    store: Box<dyn SettingsStore>,
}

impl App {
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        let mut app = Self {
            running: true,
            input_mode: InputMode::Normal,
            events: Vec::new(),
            selected_id: String::new(),
            display: DisplayState::NoSelection,
            panel_position: PanelPosition::Right,
            panel_index: -1,
            menu_cursor: 0,
            form: None,
            pending_delete: None,
            show_help: false,
            store,
        };
        app.refresh();
        app
    }

    /// Rebuild the whole display model from the store.
    pub fn refresh(&mut self) {
        self.selected_id = self.store.get_string(SELECTED_KEY);

        match events::parse_list(&self.store.get_string(EVENTS_KEY)) {
            Ok(list) => {
                self.display = match events::find(&list, &self.selected_id) {
                    Some(event) => {
                        DisplayState::Countdown(crate::dday::compute(&event.name, &event.date))
                    }
                    None => DisplayState::NoSelection,
                };
                self.events = list;
            }
            Err(e) => {
                log::error!("failed to parse stored events: {e}");
                self.events.clear();
                self.display = DisplayState::Corrupt;
            }
        }

        self.panel_position = PanelPosition::from_key(&self.store.get_string(POSITION_KEY));
        self.panel_index = self.store.get_int(INDEX_KEY);
        // Cursor may point one past the rows; that slot is the Add row.
        self.menu_cursor = self.menu_cursor.min(self.events.len());
    }

    /// Drain queued store change notifications; refresh once if any key
    /// changed. Returns whether a refresh happened.
    pub fn process_store_changes(&mut self) -> bool {
        if self.store.take_changes().is_empty() {
            return false;
        }
        self.refresh();
        true
    }

    // ── menu ──

    pub fn open_menu(&mut self) {
        self.menu_cursor = 0;
        self.input_mode = InputMode::Menu;
    }

    pub fn close_menu(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn menu_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.menu_cursor < self.events.len() {
            self.menu_cursor += 1;
        }
    }

    /// Activate the cursor row: select the event (and close the menu), or
    /// open the add form when the cursor is on the Add row.
    pub fn menu_activate(&mut self) {
        if let Some(event) = self.events.get(self.menu_cursor) {
            let id = event.id.clone();
            self.store.set_string(SELECTED_KEY, &id);
            self.close_menu();
        } else {
            self.open_add_form();
        }
    }

    // ── add / edit ──

    pub fn open_add_form(&mut self) {
        self.form = Some(FormState::add(Local::now().date_naive()));
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(event) = self.events.get(self.menu_cursor) {
            self.form = Some(FormState::edit(event));
            self.input_mode = InputMode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Menu;
    }

    /// Submit the open form. Invalid input leaves the form open, silently.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };
        if !form.is_valid() {
            return;
        }

        let name = form.name.trim().to_string();
        let date = form.date.trim().to_string();
        match form.mode {
            FormMode::Add => {
                events::add(self.store.as_mut(), &name, &date);
            }
            FormMode::Edit { id } => events::update(self.store.as_mut(), &id, &name, &date),
        }
        self.close_form();
    }

    // ── delete ──

    pub fn request_delete(&mut self) {
        if let Some(event) = self.events.get(self.menu_cursor) {
            self.pending_delete = Some(event.clone());
            self.input_mode = InputMode::Confirm;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(event) = self.pending_delete.take() {
            events::delete(self.store.as_mut(), &event.id);
        }
        self.input_mode = InputMode::Menu;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.input_mode = InputMode::Menu;
    }

    // ── panel placement ──

    pub fn cycle_panel_position(&mut self) {
        let next = self.panel_position.next();
        self.store.set_string(POSITION_KEY, next.as_key());
    }

    pub fn nudge_panel_index(&mut self, delta: i64) {
        let next = (self.panel_index + delta).max(-1);
        self.store.set_int(INDEX_KEY, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    fn app() -> App {
        App::new(Box::new(MemoryStore::new()))
    }

    fn add_via_form(app: &mut App, name: &str, date: &str) {
        app.open_add_form();
        let form = app.form.as_mut().unwrap();
        form.name = name.to_string();
        form.date = date.to_string();
        app.submit_form();
        app.process_store_changes();
    }

    #[test]
    fn starts_with_no_selection() {
        let app = app();
        assert_eq!(app.display, DisplayState::NoSelection);
        assert_eq!(app.display.label(), "No D-Day");
        assert!(app.events.is_empty());
    }

    #[test]
    fn add_flow_updates_display_after_drain() {
        let mut app = app();
        app.open_menu();
        app.menu_activate(); // empty list: cursor is on the Add row
        assert_eq!(app.input_mode, InputMode::Form);

        let form = app.form.as_mut().unwrap();
        form.name = "Launch".to_string();
        form.date = "2999-01-01".to_string();
        app.submit_form();
        assert_eq!(app.input_mode, InputMode::Menu);

        // The write alone does not repaint; the drained notification does.
        assert_eq!(app.display, DisplayState::NoSelection);
        assert!(app.process_store_changes());

        assert_eq!(app.events.len(), 1);
        assert!(matches!(&app.display, DisplayState::Countdown(s) if s.starts_with("Launch D-")));
    }

    #[test]
    fn invalid_form_submit_is_silent_and_stays_open() {
        let mut app = app();
        app.open_add_form();
        let form = app.form.as_mut().unwrap();
        form.name = "   ".to_string();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.form.is_some());
        assert!(!app.process_store_changes());
    }

    #[test]
    fn second_add_keeps_selection() {
        let mut app = app();
        add_via_form(&mut app, "Launch", "2999-01-01");
        let first_id = app.selected_id.clone();
        add_via_form(&mut app, "Review", "2999-02-01");

        assert_eq!(app.events.len(), 2);
        assert_eq!(app.selected_id, first_id);
    }

    #[test]
    fn deleting_selected_event_moves_selection() {
        let mut app = app();
        add_via_form(&mut app, "Launch", "2999-01-01");
        add_via_form(&mut app, "Review", "2999-02-01");

        app.open_menu();
        app.request_delete(); // cursor 0 = Launch, the selected one
        assert_eq!(app.input_mode, InputMode::Confirm);
        app.confirm_delete();
        app.process_store_changes();

        assert_eq!(app.events.len(), 1);
        assert_eq!(app.events[0].name, "Review");
        assert_eq!(app.selected_id, app.events[0].id);

        app.request_delete();
        app.confirm_delete();
        app.process_store_changes();
        assert!(app.events.is_empty());
        assert_eq!(app.selected_id, "");
        assert_eq!(app.display, DisplayState::NoSelection);
    }

    #[test]
    fn edit_via_form_rewrites_record_in_place() {
        let mut app = app();
        add_via_form(&mut app, "Launch", "2999-01-01");
        let id = app.events[0].id.clone();

        app.open_menu();
        app.open_edit_form();
        let form = app.form.as_mut().unwrap();
        assert_eq!(form.name, "Launch");
        form.name = "Liftoff".to_string();
        app.submit_form();
        app.process_store_changes();

        assert_eq!(app.events[0].id, id);
        assert_eq!(app.events[0].name, "Liftoff");
        assert!(matches!(&app.display, DisplayState::Countdown(s) if s.starts_with("Liftoff")));
    }

    #[test]
    fn menu_activate_selects_event_and_closes() {
        let mut app = app();
        add_via_form(&mut app, "Launch", "2999-01-01");
        add_via_form(&mut app, "Review", "2999-02-01");

        app.open_menu();
        app.menu_down();
        app.menu_activate();
        assert_eq!(app.input_mode, InputMode::Normal);
        app.process_store_changes();

        assert_eq!(app.selected_id, app.events[1].id);
        assert!(matches!(&app.display, DisplayState::Countdown(s) if s.starts_with("Review")));
    }

    #[test]
    fn menu_cursor_stops_at_add_row() {
        let mut app = app();
        add_via_form(&mut app, "Launch", "2999-01-01");
        app.open_menu();
        app.menu_down();
        app.menu_down();
        app.menu_down();
        assert_eq!(app.menu_cursor, 1); // one event, slot 1 is Add
        app.menu_up();
        app.menu_up();
        assert_eq!(app.menu_cursor, 0);
    }

    #[test]
    fn dangling_selection_degrades_to_no_event() {
        let mut store = MemoryStore::new();
        store.set_string(
            EVENTS_KEY,
            r#"[{"id":"a1","name":"Launch","date":"2999-01-01"}]"#,
        );
        store.set_string(SELECTED_KEY, "ghost");
        let app = App::new(Box::new(store));

        assert_eq!(app.events.len(), 1);
        assert_eq!(app.display, DisplayState::NoSelection);
    }

    #[test]
    fn corrupt_stored_list_shows_error_not_panic() {
        let mut store = MemoryStore::new();
        store.set_string(EVENTS_KEY, "not json");
        let app = App::new(Box::new(store));

        assert_eq!(app.display, DisplayState::Corrupt);
        assert_eq!(app.display.label(), "Error");
        assert!(app.events.is_empty());
    }

    #[test]
    fn panel_placement_round_trips_through_store() {
        let mut app = app();
        assert_eq!(app.panel_position, PanelPosition::Right);

        app.cycle_panel_position();
        app.process_store_changes();
        assert_eq!(app.panel_position, PanelPosition::Left);

        app.nudge_panel_index(3);
        app.process_store_changes();
        assert_eq!(app.panel_index, 2); // -1 + 3

        app.nudge_panel_index(-10);
        app.process_store_changes();
        assert_eq!(app.panel_index, -1); // floor
    }
}
