use chrono::NaiveDate;
use xpedition_core::search::{min_departure_date, normalize_airport_code, validate_route};
use xpedition_core::CoreError;

use crate::dom::{Document, ElementKey};
use crate::error::UiError;
use crate::page_template::AIRPORT_PATTERN;

/// Flight search form helpers: airport code casing, earliest departure date
/// and the same-airport check on submit.
#[derive(Debug)]
pub struct SearchForm {
    form: Option<ElementKey>,
    origin: Option<ElementKey>,
    destination: Option<ElementKey>,
    departure_date: Option<ElementKey>,
    airport_inputs: Vec<ElementKey>,
}

impl SearchForm {
    pub fn bind(doc: &Document) -> Self {
        let airport_inputs = doc
            .descendants(doc.root())
            .into_iter()
            .filter(|&k| {
                let el = doc.get(k);
                el.tag == "input" && el.attr("type") == Some("text") && el.attr("pattern") == Some(AIRPORT_PATTERN)
            })
            .collect();

        Self {
            form: doc.by_id("flightSearchForm"),
            origin: doc.by_id("origin"),
            destination: doc.by_id("destination"),
            departure_date: doc.by_id("departure_date"),
            airport_inputs,
        }
    }

    pub fn is_form(&self, key: ElementKey) -> bool {
        self.form == Some(key)
    }

    /// Past dates are not selectable for departure.
    pub fn restrict_departure_date(&self, doc: &mut Document, today: NaiveDate) {
        if let Some(input) = self.departure_date {
            doc.get_mut(input)
                .attributes
                .insert("min".to_string(), min_departure_date(today));
        }
    }

    /// Upper-cases airport code inputs as they are typed. Returns whether `key` was one.
    pub fn on_input(&self, doc: &mut Document, key: ElementKey) -> bool {
        if !self.airport_inputs.contains(&key) {
            return false;
        }
        let upper = normalize_airport_code(doc.value(key));
        doc.set_value(key, &upper);
        true
    }

    /// `Ok(false)` means the submission must be stopped; the user has been told why.
    pub fn validate_submit(&self, doc: &mut Document) -> Result<bool, UiError> {
        let origin = doc.require(self.origin, "origin airport input")?;
        let destination = doc.require(self.destination, "destination airport input")?;

        match validate_route(doc.value(origin), doc.value(destination)) {
            Ok(()) => Ok(true),
            Err(CoreError::ValidationError(message)) => {
                doc.alert(message);
                Ok(false)
            }
        }
    }
}
