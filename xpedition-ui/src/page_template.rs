//! Builders for the element structure the server-side templates render.
//! Components bind to these ids and classes; nothing here carries behaviour.

use xpedition_shared::{FlightOffer, Itinerary, Theme, NEW_ITINERARY};

use crate::dom::{Document, Element, ElementKey};

pub const AIRPORT_PATTERN: &str = "[A-Z]{3}";

/// Body theme plus the navbar.
pub fn render_layout(doc: &mut Document, theme: Theme) -> ElementKey {
    doc.get_mut(doc.body()).dataset.insert("theme".to_string(), theme.as_str().to_string());
    doc.append(
        doc.body(),
        Element::new("nav").with_class("navbar").with_class("bg-primary"),
    )
}

/// Filter sidebar, result cards and the save modal. Returns the card keys in offer order.
pub fn render_results(doc: &mut Document, offers: &[FlightOffer], itineraries: &[Itinerary]) -> Vec<ElementKey> {
    let body = doc.body();

    let filters = doc.append(body, Element::new("div").with_class("filters"));
    doc.append(filters, Element::new("input").with_id("minPrice").with_attr("type", "number"));
    doc.append(filters, Element::new("input").with_id("maxPrice").with_attr("type", "number"));
    for (value, label) in [("0", "Nonstop"), ("1", "1 stop"), ("2", "2+ stops")] {
        let wrapper = doc.append(filters, Element::new("label").with_text(label));
        doc.append(wrapper, Element::checkbox(value).with_checked(true));
    }
    doc.append(filters, Element::new("div").with_id("airlineFilters"));

    let list = doc.append(body, Element::new("div").with_class("flight-cards"));
    let cards: Vec<ElementKey> = offers
        .iter()
        .map(|offer| render_card(doc, list, offer, itineraries))
        .collect();

    render_save_modal(doc, itineraries);
    cards
}

fn render_card(doc: &mut Document, list: ElementKey, offer: &FlightOffer, itineraries: &[Itinerary]) -> ElementKey {
    let payload = offer.payload.to_attribute();
    let card = doc.append(
        list,
        Element::new("div")
            .with_class("flight-card")
            .with_data("price", &offer.price.to_string())
            .with_data("stops", &offer.stops.to_string())
            .with_data("airline", &offer.airline),
    );
    doc.append(
        card,
        Element::new("button")
            .with_class("select-flight-btn")
            .with_data("flight", &payload)
            .with_text("Select"),
    );

    let section = doc.append(card, Element::new("div").with_class("save-flight-section"));
    let mut select = Element::new("select")
        .with_class("itinerary-select")
        .with_option("", "Choose itinerary");
    for itinerary in itineraries {
        select = select.with_option(&itinerary.id, &itinerary.name);
    }
    doc.append(section, select);
    doc.append(
        section,
        Element::new("button")
            .with_class("save-flight-btn")
            .with_data("flight", &payload)
            .with_text("Save"),
    );
    card
}

fn render_save_modal(doc: &mut Document, itineraries: &[Itinerary]) -> ElementKey {
    let modal = doc.append(
        doc.body(),
        Element::new("div").with_id("saveFlightModal").with_class("modal").hidden(),
    );
    let content = doc.append(modal, Element::new("div").with_class("modal-content"));
    doc.append(content, Element::new("span").with_class("close").with_text("×"));
    doc.append(content, Element::new("input").with_id("flightData").with_attr("type", "hidden"));

    let mut select = Element::new("select")
        .with_id("itinerarySelect")
        .with_option("", "Choose itinerary");
    for itinerary in itineraries {
        select = select.with_option(&itinerary.id, &itinerary.name);
    }
    doc.append(content, select.with_option(NEW_ITINERARY, "Create new itinerary"));

    let fields = doc.append(content, Element::new("div").with_id("newItineraryFields").hidden());
    doc.append(fields, Element::new("input").with_id("newItineraryName").with_attr("type", "text"));
    doc.append(fields, Element::new("input").with_id("startDate").with_attr("type", "date"));
    doc.append(fields, Element::new("input").with_id("endDate").with_attr("type", "date"));
    doc.append(fields, Element::new("button").with_id("createItineraryBtn").with_text("Create"));

    doc.append(content, Element::new("button").with_id("confirmSaveFlight").with_text("Save flight"));
    modal
}

/// Settings form with its alert area and the anti-forgery meta tag.
pub fn render_settings_form(doc: &mut Document, theme: Theme, csrf_token: &str) -> ElementKey {
    doc.append(
        doc.root(),
        Element::new("meta")
            .with_attr("name", "csrf-token")
            .with_attr("content", csrf_token),
    );

    let form = doc.append(doc.body(), Element::new("form").with_id("settingsForm"));
    let alert = doc.append(
        form,
        Element::new("div").with_id("settings-alert").with_class("alert").with_class("d-none"),
    );
    doc.append(alert, Element::new("span").with_id("settings-message"));

    doc.append(
        form,
        Element::new("select")
            .with_id("theme")
            .with_option("light", "Light")
            .with_option("dark", "Dark")
            .with_value(theme.as_str()),
    );
    doc.append(
        form,
        Element::new("select")
            .with_id("font_size")
            .with_option("small", "Small")
            .with_option("medium", "Medium")
            .with_option("large", "Large")
            .with_value("medium"),
    );
    doc.append(
        form,
        Element::checkbox("y").with_id("notifications_enabled").with_checked(true),
    );
    doc.append(
        form,
        Element::new("select")
            .with_id("language")
            .with_option("en", "English")
            .with_option("es", "Spanish")
            .with_option("fr", "French")
            .with_option("de", "German")
            .with_value("en"),
    );
    doc.append(
        form,
        Element::new("button").with_attr("type", "submit").with_text("Save Changes"),
    );
    form
}

/// Flight search form with airport code inputs and the departure date.
pub fn render_search_form(doc: &mut Document) -> ElementKey {
    let form = doc.append(doc.body(), Element::new("form").with_id("flightSearchForm"));
    for id in ["origin", "destination"] {
        doc.append(
            form,
            Element::new("input")
                .with_id(id)
                .with_attr("type", "text")
                .with_attr("pattern", AIRPORT_PATTERN),
        );
    }
    doc.append(form, Element::new("input").with_id("departure_date").with_attr("type", "date"));
    form
}
