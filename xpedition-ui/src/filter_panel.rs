use std::collections::HashSet;

use tracing::{debug, info};
use xpedition_core::filter::discover_airlines;
use xpedition_core::{FilterState, OfferAttributes, PriceRange, StopBucket};

use crate::dom::{Display, Document, Element, ElementKey};
use crate::error::UiError;

/// Result-list filter bound to the price inputs, stop checkboxes and the
/// airline checkboxes it creates at load.
#[derive(Debug)]
pub struct FilterEngine {
    cards: Vec<ElementKey>,
    min_price: ElementKey,
    max_price: ElementKey,
    stop_boxes: Vec<(StopBucket, ElementKey)>,
    airline_boxes: Vec<(String, ElementKey)>,
}

impl FilterEngine {
    /// Indexes the rendered cards once and builds one checked airline box per
    /// distinct airline, in first-seen order. Cards added later are not indexed.
    pub fn initialize(doc: &mut Document) -> Result<Self, UiError> {
        let min_price = doc.require(doc.by_id("minPrice"), "minimum price input")?;
        let max_price = doc.require(doc.by_id("maxPrice"), "maximum price input")?;
        let airline_area = doc.require(doc.by_id("airlineFilters"), "airline filter area")?;

        let stop_boxes = Self::stop_checkboxes(doc, airline_area);
        let cards = doc.by_class("flight-card");

        let airlines = discover_airlines(cards.iter().filter_map(|&card| doc.get(card).data("airline")));

        let mut airline_boxes = Vec::with_capacity(airlines.len());
        for airline in airlines {
            let label = doc.append(airline_area, Element::new("label").with_text(&airline));
            let checkbox = doc.append(label, Element::checkbox(&airline).with_checked(true));
            airline_boxes.push((airline, checkbox));
        }

        info!(
            "Filter engine indexed {} offers across {} airlines",
            cards.len(),
            airline_boxes.len()
        );

        Ok(Self {
            cards,
            min_price,
            max_price,
            stop_boxes,
            airline_boxes,
        })
    }

    fn stop_checkboxes(doc: &Document, airline_area: ElementKey) -> Vec<(StopBucket, ElementKey)> {
        doc.by_class("filters")
            .into_iter()
            .flat_map(|panel| doc.descendants(panel))
            .filter(|&key| !doc.contains(airline_area, key))
            .filter_map(|key| {
                let el = doc.get(key);
                if !el.is_checkbox() {
                    return None;
                }
                StopBucket::from_control_value(&el.value).map(|bucket| (bucket, key))
            })
            .collect()
    }

    /// Reads the current control values.
    pub fn state(&self, doc: &Document) -> FilterState {
        let stops: HashSet<StopBucket> = self
            .stop_boxes
            .iter()
            .filter(|(_, key)| doc.get(*key).checked)
            .map(|(bucket, _)| *bucket)
            .collect();

        let airlines: HashSet<String> = self
            .airline_boxes
            .iter()
            .filter(|(_, key)| doc.get(*key).checked)
            .map(|(airline, _)| airline.clone())
            .collect();

        FilterState {
            price: PriceRange::from_inputs(doc.value(self.min_price), doc.value(self.max_price)),
            stops,
            airlines,
        }
    }

    /// Shows or hides every indexed card; order is never touched. Returns the visible count.
    pub fn recompute(&self, doc: &mut Document) -> usize {
        let state = self.state(doc);
        let mut visible = 0;

        for &card in &self.cards {
            let el = doc.get(card);
            let attrs = OfferAttributes::parse(el.data("price"), el.data("stops"), el.data("airline"));
            if !attrs.is_complete() {
                debug!("flight card {:?} lacks filter attributes, leaving it visible", card);
            }

            let show = state.matches(&attrs);
            if show {
                visible += 1;
            }
            doc.set_display(card, if show { Display::Block } else { Display::None });
        }

        debug!("Filters applied: {}/{} offers visible", visible, self.cards.len());
        visible
    }

    pub fn is_price_input(&self, key: ElementKey) -> bool {
        key == self.min_price || key == self.max_price
    }

    pub fn is_filter_checkbox(&self, key: ElementKey) -> bool {
        self.stop_boxes.iter().any(|(_, k)| *k == key) || self.airline_boxes.iter().any(|(_, k)| *k == key)
    }

    pub fn cards(&self) -> &[ElementKey] {
        &self.cards
    }

    pub fn min_price_input(&self) -> ElementKey {
        self.min_price
    }

    pub fn max_price_input(&self) -> ElementKey {
        self.max_price
    }

    pub fn stop_checkbox(&self, bucket: StopBucket) -> Option<ElementKey> {
        self.stop_boxes.iter().find(|(b, _)| *b == bucket).map(|(_, k)| *k)
    }

    pub fn airline_checkboxes(&self) -> &[(String, ElementKey)] {
        &self.airline_boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_template::render_results;
    use xpedition_shared::FlightOffer;

    fn offers(rows: &[(f64, u32, &str)]) -> Vec<FlightOffer> {
        rows.iter()
            .map(|(price, stops, airline)| FlightOffer::new(*price, *stops, *airline, serde_json::json!({})))
            .collect()
    }

    fn visible(doc: &Document, engine: &FilterEngine) -> Vec<bool> {
        engine.cards().iter().map(|&c| doc.get(c).is_displayed()).collect()
    }

    #[test]
    fn test_airline_boxes_deduplicated_and_checked() {
        let mut doc = Document::new();
        render_results(&mut doc, &offers(&[(100.0, 0, "A"), (200.0, 1, "B"), (300.0, 0, "A")]), &[]);

        let engine = FilterEngine::initialize(&mut doc).unwrap();
        let boxes = engine.airline_checkboxes();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].0, "A");
        assert_eq!(boxes[1].0, "B");
        assert!(boxes.iter().all(|(_, k)| doc.get(*k).checked));

        assert_eq!(engine.recompute(&mut doc), 3);
        assert_eq!(visible(&doc, &engine), vec![true, true, true]);
    }

    #[test]
    fn test_stop_boxes_found_outside_airline_area() {
        let mut doc = Document::new();
        // An airline literally named "1" must not be mistaken for a stop box
        render_results(&mut doc, &offers(&[(100.0, 0, "1")]), &[]);

        let engine = FilterEngine::initialize(&mut doc).unwrap();
        assert!(engine.stop_checkbox(StopBucket::Nonstop).is_some());
        assert!(engine.stop_checkbox(StopBucket::TwoPlus).is_some());
        assert_eq!(engine.state(&doc).stops.len(), 3);
        assert_eq!(engine.airline_checkboxes().len(), 1);
    }

    #[test]
    fn test_five_stops_follow_two_plus_box() {
        let mut doc = Document::new();
        render_results(&mut doc, &offers(&[(100.0, 5, "A"), (100.0, 0, "A")]), &[]);
        let engine = FilterEngine::initialize(&mut doc).unwrap();

        let two_plus = engine.stop_checkbox(StopBucket::TwoPlus).unwrap();
        doc.get_mut(two_plus).checked = false;
        engine.recompute(&mut doc);
        assert_eq!(visible(&doc, &engine), vec![false, true]);

        doc.get_mut(two_plus).checked = true;
        for bucket in [StopBucket::Nonstop, StopBucket::OneStop] {
            let key = engine.stop_checkbox(bucket).unwrap();
            doc.get_mut(key).checked = false;
        }
        engine.recompute(&mut doc);
        assert_eq!(visible(&doc, &engine), vec![true, false]);
    }

    #[test]
    fn test_inverted_price_range_hides_all() {
        let mut doc = Document::new();
        render_results(&mut doc, &offers(&[(50.0, 0, "A"), (300.0, 1, "B"), (800.0, 2, "C")]), &[]);
        let engine = FilterEngine::initialize(&mut doc).unwrap();

        doc.set_value(engine.min_price_input(), "500");
        doc.set_value(engine.max_price_input(), "100");
        assert_eq!(engine.recompute(&mut doc), 0);

        doc.set_value(engine.max_price_input(), "");
        assert_eq!(engine.recompute(&mut doc), 1);
    }

    #[test]
    fn test_no_cards_means_empty_airline_area() {
        let mut doc = Document::new();
        render_results(&mut doc, &[], &[]);
        let engine = FilterEngine::initialize(&mut doc).unwrap();

        let area = doc.by_id("airlineFilters").unwrap();
        assert!(doc.descendants(area).is_empty());
        assert_eq!(engine.recompute(&mut doc), 0);
    }

    #[test]
    fn test_missing_price_input_is_reported() {
        let mut doc = Document::new();
        doc.append(doc.body(), Element::new("div").with_id("airlineFilters"));

        let err = FilterEngine::initialize(&mut doc).unwrap_err();
        assert!(matches!(err, UiError::MissingElement(_)));
        assert_eq!(doc.console(), ["Element not found: minimum price input"]);
    }
}
