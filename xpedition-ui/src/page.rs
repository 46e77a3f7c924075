use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tracing::debug;
use xpedition_core::{TravelBackend, UiConfig};

use crate::appearance::{apply_theme, body_theme};
use crate::dom::{Document, ElementKey};
use crate::error::UiError;
use crate::filter_panel::FilterEngine;
use crate::save_workflow::{flight_from_control, SaveState, SaveWorkflow};
use crate::search_form::SearchForm;
use crate::settings_panel::SettingsPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Input(ElementKey),
    Change(ElementKey),
    Click(ElementKey),
    Submit(ElementKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    PreventDefault,
}

/// A loaded page: the document, its bound components and the backend they talk to.
pub struct Page {
    doc: Document,
    backend: Arc<dyn TravelBackend>,
    config: UiConfig,
    filters: Option<FilterEngine>,
    save: SaveWorkflow,
    settings: Option<SettingsPanel>,
    search: SearchForm,
}

impl Page {
    /// Page-ready wiring: theme from the body, search form helpers, the filter
    /// engine when results are on the page, the save workflow and the settings form.
    pub fn load(mut doc: Document, backend: Arc<dyn TravelBackend>, config: UiConfig) -> Self {
        let theme = body_theme(&doc);
        apply_theme(&mut doc, theme);

        let search = SearchForm::bind(&doc);
        search.restrict_departure_date(&mut doc, Local::now().date_naive());

        // Failures are already on the console; the page just runs without filters.
        let filters = match doc.first_by_class("flight-cards") {
            Some(_) => FilterEngine::initialize(&mut doc).ok(),
            None => None,
        };

        let save = SaveWorkflow::bind(&doc);
        let settings = doc.by_id("settingsForm").map(|form| SettingsPanel::bind(&doc, form));

        Self {
            doc,
            backend,
            config,
            filters,
            save,
            settings,
            search,
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn filters(&self) -> Option<&FilterEngine> {
        self.filters.as_ref()
    }

    pub fn save_state(&self) -> &SaveState {
        self.save.state()
    }

    /// Routes one DOM event to the component listening for it. Component
    /// failures are preconditions already logged by the component.
    pub async fn dispatch(&mut self, event: PageEvent) -> EventResult {
        let result = match event {
            PageEvent::Input(key) => {
                self.on_input(key);
                Ok(EventResult::Continue)
            }
            PageEvent::Change(key) => self.on_change(key).map(|_| EventResult::Continue),
            PageEvent::Click(key) => self.on_click(key).await.map(|_| EventResult::Continue),
            PageEvent::Submit(key) => self.on_submit(key).await,
        };

        result.unwrap_or_else(|e| {
            debug!("{:?} handler aborted: {}", event, e);
            EventResult::Continue
        })
    }

    fn on_input(&mut self, key: ElementKey) {
        if let Some(filters) = &self.filters {
            if filters.is_price_input(key) {
                filters.recompute(&mut self.doc);
            }
        }
        self.search.on_input(&mut self.doc, key);
    }

    fn on_change(&mut self, key: ElementKey) -> Result<(), UiError> {
        if let Some(filters) = &self.filters {
            if filters.is_filter_checkbox(key) {
                filters.recompute(&mut self.doc);
                return Ok(());
            }
        }
        if self.save.is_itinerary_select(key) {
            self.save.choose_itinerary(&mut self.doc)?;
        }
        Ok(())
    }

    async fn on_click(&mut self, key: ElementKey) -> Result<(), UiError> {
        let backend = self.backend.clone();

        if self.save.is_close_button(key) || self.save.is_modal_backdrop(key) {
            self.save.cancel(&mut self.doc);
        } else if self.save.is_confirm_button(key) {
            self.save.confirm_save(&mut self.doc, backend.as_ref()).await?;
        } else if self.save.is_create_button(key) {
            self.save.create_itinerary(&mut self.doc, backend.as_ref()).await?;
        } else if self.doc.get(key).has_class("select-flight-btn") {
            let flight = flight_from_control(&mut self.doc, key)?;
            self.save.select_flight(&mut self.doc, flight, Some(key))?;
        } else if self.doc.get(key).has_class("save-flight-btn") {
            self.save.save_from_card(&mut self.doc, backend.as_ref(), key).await?;
        }
        Ok(())
    }

    async fn on_submit(&mut self, key: ElementKey) -> Result<EventResult, UiError> {
        // The settings form never submits natively, even when its handler bails out.
        if let Some(settings) = self.settings.as_mut().filter(|s| s.form() == key) {
            let backend = self.backend.clone();
            if let Err(e) = settings
                .submit(&mut self.doc, backend.as_ref(), &self.config, Instant::now())
                .await
            {
                debug!("settings submit aborted: {}", e);
            }
            return Ok(EventResult::PreventDefault);
        }

        if self.search.is_form(key) && !self.search.validate_submit(&mut self.doc)? {
            return Ok(EventResult::PreventDefault);
        }
        Ok(EventResult::Continue)
    }

    /// Advances page timers (the settings banner auto-hide).
    pub fn tick(&mut self, now: Instant) {
        if let Some(settings) = self.settings.as_mut() {
            settings.tick(&mut self.doc, now);
        }
    }

    // User-action helpers: change the control the way the browser would, then fire its event.

    pub async fn type_into(&mut self, key: ElementKey, text: &str) -> EventResult {
        self.doc.set_value(key, text);
        self.dispatch(PageEvent::Input(key)).await
    }

    pub async fn set_checked(&mut self, key: ElementKey, checked: bool) -> EventResult {
        self.doc.get_mut(key).checked = checked;
        self.dispatch(PageEvent::Change(key)).await
    }

    pub async fn choose(&mut self, key: ElementKey, value: &str) -> EventResult {
        self.doc.set_value(key, value);
        self.dispatch(PageEvent::Change(key)).await
    }

    pub async fn click(&mut self, key: ElementKey) -> EventResult {
        if self.doc.get(key).disabled {
            return EventResult::Continue;
        }
        self.dispatch(PageEvent::Click(key)).await
    }

    pub async fn submit(&mut self, form: ElementKey) -> EventResult {
        self.dispatch(PageEvent::Submit(form)).await
    }
}
