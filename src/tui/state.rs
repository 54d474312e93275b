use ratatui::widgets::ListState;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;

use crate::analysis::AnalysisBinding;
use crate::config::{ConfigController, ConfigListener, ConfigNotice, ConfigStore, Field, Provider};
use crate::tui::input::TextInput;

// ── Focus ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    ProviderList,
    Field(Field),
}

// ── App state ─────────────────────────────────────────────────────────────────

pub struct App {
    pub controller: ConfigController<Box<dyn ConfigStore>>,
    pub analysis: Rc<RefCell<AnalysisBinding>>,
    pub store_label: String,
    pub focus: Focus,
    pub provider_list_state: ListState,
    pub api_key: TextInput,
    pub base_url: TextInput,
    pub model_name: TextInput,
    pub reveal_key: bool,
    pub status: String,
    pub status_is_error: bool,
    pub status_at: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    /// Builds the app and loads the saved configuration from `store`.
    pub fn new(store: Box<dyn ConfigStore>, store_label: impl Into<String>) -> Result<Self> {
        let analysis = Rc::new(RefCell::new(AnalysisBinding::new()));
        let sink = Rc::clone(&analysis);
        let mut controller = ConfigController::new(store)
            .with_listener(move |n: &ConfigNotice| sink.borrow_mut().on_config_change(n));
        controller.initialize()?;

        let mut app = App {
            controller,
            analysis,
            store_label: store_label.into(),
            focus: Focus::ProviderList,
            provider_list_state: ListState::default(),
            api_key: TextInput::new(),
            base_url: TextInput::new(),
            model_name: TextInput::new(),
            reveal_key: false,
            status: String::new(),
            status_is_error: false,
            status_at: None,
            should_quit: false,
        };
        app.sync_from_draft();
        Ok(app)
    }

    pub fn selected_provider(&self) -> Provider {
        self.controller.selected_provider().unwrap_or_default()
    }

    pub fn provider_index(&self) -> usize {
        let selected = self.selected_provider();
        Provider::all().iter().position(|p| *p == selected).unwrap_or(0)
    }

    /// Fields shown for the selected provider, in display order.
    pub fn visible_fields(&self) -> Vec<Field> {
        self.controller.profile().visible_fields()
    }

    pub fn input(&self, field: Field) -> &TextInput {
        match field {
            Field::ApiKey    => &self.api_key,
            Field::BaseUrl   => &self.base_url,
            Field::ModelName => &self.model_name,
        }
    }

    pub fn input_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::ApiKey    => &mut self.api_key,
            Field::BaseUrl   => &mut self.base_url,
            Field::ModelName => &mut self.model_name,
        }
    }

    /// Pushes the focused input's value into the controller's draft.
    pub fn commit_input(&mut self, field: Field) {
        let value = self.input(field).value.clone();
        self.controller.edit_field(field, value);
    }

    /// Reloads the inputs and list selection from the controller.
    pub fn sync_from_draft(&mut self) {
        for field in Field::all() {
            let value = self.controller.draft().get(field).to_string();
            self.input_mut(field).set(&value);
        }
        let index = self.provider_index();
        self.provider_list_state.select(Some(index));
        if let Focus::Field(f) = self.focus {
            if !self.visible_fields().contains(&f) {
                self.focus = Focus::ProviderList;
            }
        }
    }

    pub fn select_provider_at(&mut self, index: usize) {
        let providers = Provider::all();
        let index = index.min(providers.len() - 1);
        let provider = providers[index];
        if provider == self.selected_provider() {
            return;
        }
        self.controller.switch_provider(provider);
        self.sync_from_draft();
        self.clear_status();
    }

    pub fn select_previous_provider(&mut self) {
        self.select_provider_at(self.provider_index().saturating_sub(1));
    }

    pub fn select_next_provider(&mut self) {
        self.select_provider_at(self.provider_index() + 1);
    }

    /// Moves focus through the provider list and the visible fields.
    pub fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Focus::ProviderList];
        order.extend(self.visible_fields().into_iter().map(Focus::Field));
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % order.len()
        } else {
            (pos + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    pub fn save(&mut self) {
        match self.controller.save() {
            Ok(event) => {
                self.sync_from_draft();
                self.set_status(event.message(), false);
            }
            Err(e) => {
                if let Some(field) = e.field() {
                    self.focus = Focus::Field(field);
                }
                self.set_status(&e.to_string(), true);
            }
        }
    }

    pub fn remove(&mut self) {
        if !self.controller.can_remove() {
            return;
        }
        match self.controller.remove() {
            Ok(event) => {
                self.focus = Focus::ProviderList;
                self.sync_from_draft();
                self.set_status(event.message(), false);
            }
            Err(e) => self.set_status(&e.to_string(), true),
        }
    }

    pub fn set_status(&mut self, message: &str, is_error: bool) {
        self.status = message.to_string();
        self.status_is_error = is_error;
        self.status_at = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
        self.status_is_error = false;
        self.status_at = None;
    }
}
