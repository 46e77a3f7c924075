use tracing::{error, info, warn};
use uuid::Uuid;
use xpedition_core::TravelBackend;
use xpedition_shared::{
    CreateItineraryRequest, FlightPayload, Itinerary, ItineraryChoice, SaveFlightRequest,
};

use crate::dom::{Display, Document, ElementKey};
use crate::error::UiError;

pub const SELECT_ITINERARY_PROMPT: &str = "Please select an itinerary";
pub const CREATE_ITINERARY_FIRST_PROMPT: &str = "Please create the new itinerary before saving the flight";
pub const SAVED_MESSAGE: &str = "Flight saved to itinerary!";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save flight";
pub const SAVE_TRANSPORT_MESSAGE: &str = "An error occurred while saving the flight";
pub const CREATE_TRANSPORT_MESSAGE: &str = "An error occurred while creating the itinerary";
pub const SAVED_LABEL: &str = "Saved";

/// A flight waiting for its destination itinerary.
#[derive(Debug, Clone)]
pub struct PendingSave {
    /// Correlates the log lines of one save attempt.
    pub attempt: Uuid,
    pub flight: FlightPayload,
    pub itinerary_id: Option<String>,
    /// Control that started the save; disabled once the flight is saved.
    pub origin: Option<ElementKey>,
}

impl PendingSave {
    fn new(flight: FlightPayload, origin: Option<ElementKey>) -> Self {
        Self {
            attempt: Uuid::new_v4(),
            flight,
            itinerary_id: None,
            origin,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum SaveState {
    #[default]
    Idle,
    ModalOpen(PendingSave),
    Submitting(PendingSave),
}

/// How a confirmed save ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stopped locally before any request was sent.
    Blocked,
    Saved,
    /// The backend answered `success: false`.
    Rejected(String),
    /// No usable answer from the backend.
    Failed,
}

/// The "save flight to itinerary" modal and the inline per-card save buttons.
#[derive(Debug)]
pub struct SaveWorkflow {
    modal: Option<ElementKey>,
    flight_data: Option<ElementKey>,
    close_button: Option<ElementKey>,
    itinerary_select: Option<ElementKey>,
    new_fields: Option<ElementKey>,
    new_name: Option<ElementKey>,
    start_date: Option<ElementKey>,
    end_date: Option<ElementKey>,
    confirm_button: Option<ElementKey>,
    create_button: Option<ElementKey>,
    state: SaveState,
}

impl SaveWorkflow {
    /// Binds whatever parts of the modal the page has. Missing parts are only
    /// reported when an action needs them.
    pub fn bind(doc: &Document) -> Self {
        let modal = doc.by_id("saveFlightModal");
        Self {
            modal,
            flight_data: doc.by_id("flightData"),
            close_button: modal.and_then(|m| doc.class_in(m, "close").into_iter().next()),
            itinerary_select: doc.by_id("itinerarySelect"),
            new_fields: doc.by_id("newItineraryFields"),
            new_name: doc.by_id("newItineraryName"),
            start_date: doc.by_id("startDate"),
            end_date: doc.by_id("endDate"),
            confirm_button: doc.by_id("confirmSaveFlight"),
            create_button: doc.by_id("createItineraryBtn"),
            state: SaveState::Idle,
        }
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SaveState::ModalOpen(_))
    }

    pub fn is_close_button(&self, key: ElementKey) -> bool {
        self.close_button == Some(key)
    }

    pub fn is_modal_backdrop(&self, key: ElementKey) -> bool {
        self.modal == Some(key)
    }

    pub fn is_itinerary_select(&self, key: ElementKey) -> bool {
        self.itinerary_select == Some(key)
    }

    pub fn is_confirm_button(&self, key: ElementKey) -> bool {
        self.confirm_button == Some(key)
    }

    pub fn is_create_button(&self, key: ElementKey) -> bool {
        self.create_button == Some(key)
    }

    /// Idle → ModalOpen. Without the modal or its payload holder the modal stays closed.
    pub fn select_flight(
        &mut self,
        doc: &mut Document,
        flight: FlightPayload,
        origin: Option<ElementKey>,
    ) -> Result<(), UiError> {
        let modal = doc.require(self.modal, "save flight modal")?;
        let holder = doc.require(self.flight_data, "flight data input")?;

        doc.set_value(holder, &flight.to_attribute());
        doc.set_display(modal, Display::Block);

        let pending = PendingSave::new(flight, origin);
        info!(attempt = %pending.attempt, "Flight selected for saving");
        self.state = SaveState::ModalOpen(pending);
        Ok(())
    }

    /// Close button or backdrop click. Drops the pending flight without contacting the backend.
    pub fn cancel(&mut self, doc: &mut Document) {
        self.close_modal(doc);
        if let SaveState::ModalOpen(pending) = std::mem::take(&mut self.state) {
            info!(attempt = %pending.attempt, "Save flight cancelled");
        }
    }

    /// Hides the modal and empties its payload holder.
    fn close_modal(&self, doc: &mut Document) {
        if let Some(modal) = self.modal {
            doc.set_display(modal, Display::None);
        }
        if let Some(flight_data) = self.flight_data {
            doc.set_value(flight_data, "");
        }
    }

    /// Reveals the new-itinerary fields (and makes them required) only while "new" is selected.
    pub fn choose_itinerary(&mut self, doc: &mut Document) -> Result<(), UiError> {
        let select = doc.require(self.itinerary_select, "itinerary selector")?;
        let fields = doc.require(self.new_fields, "new itinerary fields")?;

        let creating = ItineraryChoice::from_value(doc.value(select)) == ItineraryChoice::CreateNew;
        doc.set_display(fields, if creating { Display::Block } else { Display::None });
        for input in [self.new_name, self.start_date, self.end_date].into_iter().flatten() {
            doc.get_mut(input).required = creating;
        }
        Ok(())
    }

    /// ModalOpen → Submitting → Idle. Without a chosen itinerary the user is
    /// prompted and the modal stays open. Any backend answer closes the modal.
    pub async fn confirm_save(
        &mut self,
        doc: &mut Document,
        backend: &dyn TravelBackend,
    ) -> Result<SaveOutcome, UiError> {
        let select = doc.require(self.itinerary_select, "itinerary selector")?;
        let mut pending = match &self.state {
            SaveState::ModalOpen(pending) => pending.clone(),
            _ => return Err(doc.report(UiError::NoPendingSave)),
        };

        let itinerary_id = match ItineraryChoice::from_value(doc.value(select)) {
            ItineraryChoice::Existing(id) => id,
            ItineraryChoice::Unselected => {
                doc.alert(SELECT_ITINERARY_PROMPT);
                return Ok(SaveOutcome::Blocked);
            }
            ItineraryChoice::CreateNew => {
                doc.alert(CREATE_ITINERARY_FIRST_PROMPT);
                return Ok(SaveOutcome::Blocked);
            }
        };

        pending.itinerary_id = Some(itinerary_id.clone());
        self.state = SaveState::Submitting(pending.clone());

        let outcome = submit(doc, backend, &pending, itinerary_id).await;

        self.close_modal(doc);
        self.state = SaveState::Idle;
        Ok(outcome)
    }

    /// Inline save from a result card: the card's own selector picks the
    /// itinerary and the modal is never involved.
    pub async fn save_from_card(
        &mut self,
        doc: &mut Document,
        backend: &dyn TravelBackend,
        button: ElementKey,
    ) -> Result<SaveOutcome, UiError> {
        let flight = flight_from_control(doc, button)?;
        let section = doc.closest(button, "save-flight-section");
        let select = section.and_then(|s| doc.class_in(s, "itinerary-select").into_iter().next());
        let select = doc.require(select, "card itinerary selector")?;

        let itinerary_id = match ItineraryChoice::from_value(doc.value(select)) {
            ItineraryChoice::Existing(id) => id,
            _ => {
                doc.alert(SELECT_ITINERARY_PROMPT);
                return Ok(SaveOutcome::Blocked);
            }
        };

        let mut pending = PendingSave::new(flight, Some(button));
        pending.itinerary_id = Some(itinerary_id.clone());
        Ok(submit(doc, backend, &pending, itinerary_id).await)
    }

    /// Independent of any pending save. On success the new itinerary is added
    /// to the selector and selected; on failure the fields stay open for another try.
    pub async fn create_itinerary(
        &mut self,
        doc: &mut Document,
        backend: &dyn TravelBackend,
    ) -> Result<Option<Itinerary>, UiError> {
        let select = doc.require(self.itinerary_select, "itinerary selector")?;
        let name = doc.require(self.new_name, "new itinerary name")?;
        let start = doc.require(self.start_date, "itinerary start date")?;
        let end = doc.require(self.end_date, "itinerary end date")?;

        let request = CreateItineraryRequest {
            name: doc.value(name).to_string(),
            start_date: doc.value(start).to_string(),
            end_date: doc.value(end).to_string(),
        };

        let response = match backend.create_itinerary(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Creating itinerary {:?} failed: {}", request.name, e);
                doc.alert(CREATE_TRANSPORT_MESSAGE);
                return Ok(None);
            }
        };

        if !response.success {
            let reason = response.error.unwrap_or_else(|| "unknown error".to_string());
            warn!("Backend refused itinerary {:?}: {}", request.name, reason);
            doc.alert(format!("Error creating itinerary: {}", reason));
            return Ok(None);
        }

        let Some(id) = response.id else {
            error!("Itinerary {:?} created without an id in the response", request.name);
            doc.alert(CREATE_TRANSPORT_MESSAGE);
            return Ok(None);
        };
        let itinerary = Itinerary {
            id,
            name: response.name.unwrap_or(request.name),
        };

        doc.add_option(select, &itinerary.id, &itinerary.name);
        doc.set_value(select, &itinerary.id);
        self.choose_itinerary(doc)?;

        info!("Itinerary {} ({}) created and selected", itinerary.id, itinerary.name);
        Ok(Some(itinerary))
    }
}

/// Reads and parses the `data-flight` payload of a trigger control.
pub fn flight_from_control(doc: &mut Document, control: ElementKey) -> Result<FlightPayload, UiError> {
    let raw = doc.get(control).data("flight").map(str::to_string);
    let raw = match raw {
        Some(raw) => raw,
        None => return Err(doc.report(UiError::MissingElement("data-flight attribute".to_string()))),
    };
    FlightPayload::from_attribute(&raw).map_err(|e| doc.report(UiError::InvalidFlightData(e.to_string())))
}

async fn submit(
    doc: &mut Document,
    backend: &dyn TravelBackend,
    pending: &PendingSave,
    itinerary_id: String,
) -> SaveOutcome {
    let request = SaveFlightRequest {
        itinerary_id,
        flight_data: pending.flight.clone(),
    };

    match backend.save_flight(&request).await {
        Ok(response) if response.success => {
            info!(attempt = %pending.attempt, "Flight saved to itinerary {}", request.itinerary_id);
            doc.alert(SAVED_MESSAGE);
            if let Some(origin) = pending.origin {
                let control = doc.get_mut(origin);
                control.disabled = true;
                control.text = SAVED_LABEL.to_string();
            }
            SaveOutcome::Saved
        }
        Ok(response) => {
            let message = match response.error {
                Some(reason) => format!("Error saving flight: {}", reason),
                None => SAVE_FAILED_MESSAGE.to_string(),
            };
            warn!(attempt = %pending.attempt, "Backend refused flight save: {}", message);
            doc.alert(message.clone());
            SaveOutcome::Rejected(message)
        }
        Err(e) => {
            error!(attempt = %pending.attempt, "Saving flight failed: {}", e);
            doc.alert(SAVE_TRANSPORT_MESSAGE);
            SaveOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_template::render_results;
    use crate::testing::RecordingBackend;
    use serde_json::json;
    use xpedition_shared::{CreateItineraryResponse, FlightOffer, SaveFlightResponse};

    fn page() -> (Document, SaveWorkflow) {
        let mut doc = Document::new();
        render_results(
            &mut doc,
            &[FlightOffer::new(420.0, 1, "KL", json!({ "flight_number": "KL642" }))],
            &[Itinerary { id: "7".to_string(), name: "Summer".to_string() }],
        );
        let workflow = SaveWorkflow::bind(&doc);
        (doc, workflow)
    }

    fn payload() -> FlightPayload {
        FlightPayload::new(json!({ "flight_number": "KL642" }))
    }

    #[test]
    fn test_select_flight_opens_modal() {
        let (mut doc, mut workflow) = page();
        workflow.select_flight(&mut doc, payload(), None).unwrap();

        let modal = doc.by_id("saveFlightModal").unwrap();
        assert!(doc.get(modal).is_displayed());
        assert!(workflow.is_open());
        let holder = doc.by_id("flightData").unwrap();
        assert!(doc.value(holder).contains("KL642"));
    }

    #[test]
    fn test_select_flight_without_modal_logs_and_stays_idle() {
        let mut doc = Document::new();
        let mut workflow = SaveWorkflow::bind(&doc);

        let err = workflow.select_flight(&mut doc, payload(), None).unwrap_err();
        assert!(matches!(err, UiError::MissingElement(_)));
        assert!(matches!(workflow.state(), SaveState::Idle));
        assert_eq!(doc.console(), ["Element not found: save flight modal"]);
    }

    #[test]
    fn test_cancel_discards_payload() {
        let (mut doc, mut workflow) = page();
        workflow.select_flight(&mut doc, payload(), None).unwrap();
        workflow.cancel(&mut doc);

        assert!(matches!(workflow.state(), SaveState::Idle));
        assert!(!doc.get(doc.by_id("saveFlightModal").unwrap()).is_displayed());
        assert_eq!(doc.value(doc.by_id("flightData").unwrap()), "");
    }

    #[test]
    fn test_choosing_new_toggles_required_fields() {
        let (mut doc, mut workflow) = page();
        let select = doc.by_id("itinerarySelect").unwrap();
        let fields = doc.by_id("newItineraryFields").unwrap();
        let name = doc.by_id("newItineraryName").unwrap();
        let end = doc.by_id("endDate").unwrap();

        doc.set_value(select, "new");
        workflow.choose_itinerary(&mut doc).unwrap();
        assert!(doc.get(fields).is_displayed());
        assert!(doc.get(name).required);
        assert!(doc.get(end).required);

        doc.set_value(select, "7");
        workflow.choose_itinerary(&mut doc).unwrap();
        assert!(!doc.get(fields).is_displayed());
        assert!(!doc.get(name).required);
        assert!(!doc.get(end).required);
    }

    #[tokio::test]
    async fn test_confirm_without_itinerary_never_calls_backend() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default();
        workflow.select_flight(&mut doc, payload(), None).unwrap();

        let outcome = workflow.confirm_save(&mut doc, &backend).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Blocked);
        assert!(backend.save_calls().is_empty());
        assert_eq!(doc.alerts(), [SELECT_ITINERARY_PROMPT]);
        assert!(workflow.is_open());
    }

    #[tokio::test]
    async fn test_confirm_success_disables_origin_and_closes() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default();
        let origin = doc.first_by_class("select-flight-btn").unwrap();

        workflow.select_flight(&mut doc, payload(), Some(origin)).unwrap();
        doc.set_value(doc.by_id("itinerarySelect").unwrap(), "7");
        let outcome = workflow.confirm_save(&mut doc, &backend).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Saved);
        let calls = backend.save_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].itinerary_id, "7");
        assert_eq!(calls[0].flight_data, payload());

        assert!(matches!(workflow.state(), SaveState::Idle));
        assert!(!doc.get(doc.by_id("saveFlightModal").unwrap()).is_displayed());
        assert_eq!(doc.value(doc.by_id("flightData").unwrap()), "");
        assert!(doc.get(origin).disabled);
        assert_eq!(doc.get(origin).text, SAVED_LABEL);
        assert_eq!(doc.alerts(), [SAVED_MESSAGE]);
    }

    #[tokio::test]
    async fn test_rejected_save_closes_modal_with_message() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default().with_save_reply(Some(SaveFlightResponse {
            success: false,
            error: Some("Itinerary is archived".to_string()),
        }));
        let origin = doc.first_by_class("select-flight-btn").unwrap();

        workflow.select_flight(&mut doc, payload(), Some(origin)).unwrap();
        doc.set_value(doc.by_id("itinerarySelect").unwrap(), "7");
        let outcome = workflow.confirm_save(&mut doc, &backend).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Rejected("Error saving flight: Itinerary is archived".to_string()));
        assert!(!workflow.is_open());
        assert!(!doc.get(origin).disabled);
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default().with_save_reply(None);

        workflow.select_flight(&mut doc, payload(), None).unwrap();
        doc.set_value(doc.by_id("itinerarySelect").unwrap(), "7");
        let outcome = workflow.confirm_save(&mut doc, &backend).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Failed);
        assert_eq!(doc.alerts(), [SAVE_TRANSPORT_MESSAGE]);
        assert!(matches!(workflow.state(), SaveState::Idle));
    }

    #[tokio::test]
    async fn test_confirm_without_selected_flight_is_reported() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default();

        let err = workflow.confirm_save(&mut doc, &backend).await.unwrap_err();
        assert!(matches!(err, UiError::NoPendingSave));
        assert!(backend.save_calls().is_empty());
    }

    #[tokio::test]
    async fn test_inline_card_save() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default();
        let button = doc.first_by_class("save-flight-btn").unwrap();

        let outcome = workflow.save_from_card(&mut doc, &backend, button).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Blocked);
        assert!(backend.save_calls().is_empty());

        let select = doc.first_by_class("itinerary-select").unwrap();
        doc.set_value(select, "7");
        let outcome = workflow.save_from_card(&mut doc, &backend, button).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(doc.get(button).disabled);
        assert_eq!(doc.get(button).text, SAVED_LABEL);
        assert_eq!(backend.save_calls()[0].flight_data.0["flight_number"], "KL642");
    }

    #[tokio::test]
    async fn test_create_itinerary_adds_and_selects_option() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default().with_create_reply(Some(CreateItineraryResponse {
            success: true,
            id: Some("42".to_string()),
            name: Some("Trip".to_string()),
            error: None,
        }));
        let select = doc.by_id("itinerarySelect").unwrap();
        doc.set_value(select, "new");
        workflow.choose_itinerary(&mut doc).unwrap();
        doc.set_value(doc.by_id("newItineraryName").unwrap(), "Trip");
        doc.set_value(doc.by_id("startDate").unwrap(), "2025-06-01");
        doc.set_value(doc.by_id("endDate").unwrap(), "2025-06-10");

        let created = workflow.create_itinerary(&mut doc, &backend).await.unwrap();

        assert_eq!(created, Some(Itinerary { id: "42".to_string(), name: "Trip".to_string() }));
        let options = &doc.get(select).options;
        let last = options.last().unwrap();
        assert_eq!((last.value.as_str(), last.text.as_str()), ("42", "Trip"));
        assert_eq!(doc.value(select), "42");
        assert!(!doc.get(doc.by_id("newItineraryFields").unwrap()).is_displayed());
        assert_eq!(backend.create_calls()[0].start_date, "2025-06-01");
    }

    #[tokio::test]
    async fn test_create_itinerary_failure_keeps_fields_open() {
        let (mut doc, mut workflow) = page();
        let backend = RecordingBackend::default().with_create_reply(Some(CreateItineraryResponse {
            success: false,
            id: None,
            name: None,
            error: Some("Name is required".to_string()),
        }));
        let select = doc.by_id("itinerarySelect").unwrap();
        doc.set_value(select, "new");
        workflow.choose_itinerary(&mut doc).unwrap();
        let option_count = doc.get(select).options.len();

        let created = workflow.create_itinerary(&mut doc, &backend).await.unwrap();

        assert!(created.is_none());
        assert_eq!(doc.alerts(), ["Error creating itinerary: Name is required"]);
        assert_eq!(doc.get(select).options.len(), option_count);
        assert!(doc.get(doc.by_id("newItineraryFields").unwrap()).is_displayed());
    }
}
