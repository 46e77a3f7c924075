use std::collections::HashSet;

/// Stop-count bucket used by the stop filter; three or more stops share the "2+" bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StopBucket {
    Nonstop,
    OneStop,
    TwoPlus,
}

impl StopBucket {
    pub const ALL: [StopBucket; 3] = [StopBucket::Nonstop, StopBucket::OneStop, StopBucket::TwoPlus];

    pub fn from_stops(stops: u32) -> Self {
        match stops {
            0 => StopBucket::Nonstop,
            1 => StopBucket::OneStop,
            _ => StopBucket::TwoPlus,
        }
    }

    /// Maps a stop checkbox value (`"0"`, `"1"`, `"2"`) to its bucket.
    pub fn from_control_value(value: &str) -> Option<Self> {
        match value {
            "0" => Some(StopBucket::Nonstop),
            "1" => Some(StopBucket::OneStop),
            "2" => Some(StopBucket::TwoPlus),
            _ => None,
        }
    }

}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn unbounded() -> Self {
        Self { min: 0.0, max: f64::INFINITY }
    }

    /// Builds the range from the raw price inputs. An empty or unparseable
    /// field imposes no bound on its side. An inverted range is kept as-is
    /// and simply matches nothing.
    pub fn from_inputs(min: &str, max: &str) -> Self {
        Self {
            min: parse_bound(min).unwrap_or(0.0),
            max: parse_bound(max).unwrap_or(f64::INFINITY),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    // Only finite numbers count; "inf", "NaN" and the like are not prices
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Filterable attributes read off one rendered offer. `None` means the
/// attribute was absent or unparseable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferAttributes {
    pub price: Option<f64>,
    pub stops: Option<u32>,
    pub airline: Option<String>,
}

impl OfferAttributes {
    pub fn parse(price: Option<&str>, stops: Option<&str>, airline: Option<&str>) -> Self {
        Self {
            price: price.and_then(parse_bound),
            stops: stops.and_then(|s| s.trim().parse::<u32>().ok()),
            airline: airline.map(str::to_string),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.stops.is_some() && self.airline.is_some()
    }
}

/// Current predicate values of the result filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub price: PriceRange,
    pub stops: HashSet<StopBucket>,
    pub airlines: HashSet<String>,
}

impl FilterState {
    /// Everything allowed: no price bounds, all stop buckets, every known airline.
    pub fn permissive<I, S>(airlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            price: PriceRange::unbounded(),
            stops: StopBucket::ALL.into_iter().collect(),
            airlines: airlines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn price_match(&self, price: f64) -> bool {
        self.price.contains(price)
    }

    pub fn stops_match(&self, stops: u32) -> bool {
        self.stops.contains(&StopBucket::from_stops(stops))
    }

    pub fn airline_match(&self, airline: &str) -> bool {
        self.airlines.contains(airline)
    }

    /// Visibility of one offer. Offers missing any attribute stay visible.
    pub fn matches(&self, offer: &OfferAttributes) -> bool {
        match (offer.price, offer.stops, offer.airline.as_deref()) {
            (Some(price), Some(stops), Some(airline)) => {
                self.price_match(price) && self.stops_match(stops) && self.airline_match(airline)
            }
            _ => true,
        }
    }
}

/// Distinct airlines in first-seen order.
pub fn discover_airlines<'a, I>(airlines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for airline in airlines {
        if seen.insert(airline) {
            ordered.push(airline.to_string());
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(price: f64, stops: u32, airline: &str) -> OfferAttributes {
        OfferAttributes {
            price: Some(price),
            stops: Some(stops),
            airline: Some(airline.to_string()),
        }
    }

    #[test]
    fn test_empty_price_inputs_are_unbounded() {
        let state = FilterState {
            price: PriceRange::from_inputs("", ""),
            ..FilterState::permissive(["AA"])
        };
        assert!(state.matches(&offer(0.0, 0, "AA")));
        assert!(state.matches(&offer(1_000_000.0, 0, "AA")));
    }

    #[test]
    fn test_unparseable_bounds_fall_back() {
        let range = PriceRange::from_inputs("abc", "  ");
        assert_eq!(range, PriceRange::unbounded());

        let range = PriceRange::from_inputs("inf", "infinity");
        assert_eq!(range, PriceRange::unbounded());
        assert!(range.contains(100.0));

        let range = PriceRange::from_inputs("NaN", "-inf");
        assert_eq!(range, PriceRange::unbounded());

        let range = PriceRange::from_inputs(" 150 ", "300.5");
        assert_eq!(range.min, 150.0);
        assert_eq!(range.max, 300.5);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let state = FilterState {
            price: PriceRange::from_inputs("100", "200"),
            ..FilterState::permissive(["AA"])
        };
        assert!(state.matches(&offer(100.0, 0, "AA")));
        assert!(state.matches(&offer(200.0, 0, "AA")));
        assert!(!state.matches(&offer(99.99, 0, "AA")));
        assert!(!state.matches(&offer(200.01, 0, "AA")));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let mut state = FilterState::permissive(["AA", "BA"]);
        state.price = PriceRange::from_inputs("500", "100");

        for price in [0.0, 100.0, 300.0, 500.0, 10_000.0] {
            assert!(!state.matches(&offer(price, 0, "AA")));
            assert!(!state.matches(&offer(price, 2, "BA")));
        }
    }

    #[test]
    fn test_many_stops_follow_two_plus_bucket() {
        let mut state = FilterState::permissive(["AA"]);

        state.stops = [StopBucket::Nonstop, StopBucket::OneStop].into_iter().collect();
        assert!(!state.matches(&offer(100.0, 5, "AA")));

        state.stops = [StopBucket::TwoPlus].into_iter().collect();
        assert!(state.matches(&offer(100.0, 5, "AA")));
        assert!(state.matches(&offer(100.0, 2, "AA")));
        assert!(!state.matches(&offer(100.0, 1, "AA")));
    }

    #[test]
    fn test_airline_predicate_in_isolation() {
        let mut state = FilterState::permissive(["AA", "BA"]);
        state.airlines.remove("BA");

        assert!(state.matches(&offer(100.0, 0, "AA")));
        assert!(!state.matches(&offer(100.0, 0, "BA")));
        assert!(!state.matches(&offer(100.0, 0, "LH")));
    }

    #[test]
    fn test_predicates_combine_as_conjunction() {
        let mut state = FilterState::permissive(["AA", "BA"]);
        state.price = PriceRange::from_inputs("", "300");
        state.stops = [StopBucket::Nonstop].into_iter().collect();
        state.airlines = ["AA".to_string()].into_iter().collect();

        assert!(state.matches(&offer(250.0, 0, "AA")));
        assert!(!state.matches(&offer(350.0, 0, "AA")));
        assert!(!state.matches(&offer(250.0, 1, "AA")));
        assert!(!state.matches(&offer(250.0, 0, "BA")));
    }

    #[test]
    fn test_empty_airline_universe_hides_everything() {
        let state = FilterState::permissive(Vec::<String>::new());
        assert!(!state.matches(&offer(10.0, 0, "AA")));
    }

    #[test]
    fn test_incomplete_offer_defaults_to_visible() {
        let state = FilterState {
            price: PriceRange::from_inputs("500", "100"),
            ..FilterState::permissive(Vec::<String>::new())
        };
        let attrs = OfferAttributes::parse(Some("n/a"), Some("1"), Some("AA"));
        assert!(!attrs.is_complete());
        assert!(state.matches(&attrs));
    }

    #[test]
    fn test_discover_airlines_keeps_first_seen_order() {
        let airlines = discover_airlines(["BA", "AA", "BA", "LH", "AA"]);
        assert_eq!(airlines, vec!["BA", "AA", "LH"]);
    }
}
