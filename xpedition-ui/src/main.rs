use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xpedition_client::{app_config::Config, http_backend::HttpBackend};
use xpedition_core::StopBucket;
use xpedition_shared::{FlightOffer, Itinerary, Theme};
use xpedition_ui::page_template::{render_layout, render_results};
use xpedition_ui::{Document, FilterEngine, Page};

#[derive(Parser, Debug)]
#[command(name = "xpedition", about = "Drive the flight results page from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the offers that stay visible under the given filters
    Filter {
        /// JSON file holding an array of offers
        #[arg(long)]
        offers: PathBuf,
        #[arg(long)]
        min_price: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        /// Stop buckets to keep (0, 1, 2); all when omitted
        #[arg(long, value_delimiter = ',')]
        stops: Vec<u32>,
        /// Airlines to keep; all when omitted
        #[arg(long, value_delimiter = ',')]
        airline: Vec<String>,
    },
    /// Save one offer to an existing itinerary through the configured backend
    Save {
        #[arg(long)]
        offers: PathBuf,
        /// Zero-based position of the offer in the file
        #[arg(long)]
        index: usize,
        #[arg(long)]
        itinerary: String,
    },
}

fn read_offers(path: &PathBuf) -> Result<Vec<FlightOffer>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing offers in {}", path.display()))
}

fn filter(
    offers: Vec<FlightOffer>,
    min_price: Option<String>,
    max_price: Option<String>,
    stops: Vec<u32>,
    airlines: Vec<String>,
) -> Result<()> {
    let mut doc = Document::new();
    render_layout(&mut doc, Theme::Light);
    render_results(&mut doc, &offers, &[]);
    let engine = FilterEngine::initialize(&mut doc)?;

    doc.set_value(engine.min_price_input(), min_price.as_deref().unwrap_or_default());
    doc.set_value(engine.max_price_input(), max_price.as_deref().unwrap_or_default());
    if !stops.is_empty() {
        let keep: Vec<StopBucket> = stops.into_iter().map(StopBucket::from_stops).collect();
        for bucket in StopBucket::ALL {
            if let Some(key) = engine.stop_checkbox(bucket) {
                doc.get_mut(key).checked = keep.contains(&bucket);
            }
        }
    }
    if !airlines.is_empty() {
        for (airline, key) in engine.airline_checkboxes() {
            doc.get_mut(*key).checked = airlines.contains(airline);
        }
    }

    let visible = engine.recompute(&mut doc);
    tracing::info!("{} of {} offers visible", visible, offers.len());

    let shown: Vec<&FlightOffer> = engine
        .cards()
        .iter()
        .zip(&offers)
        .filter(|(card, _)| doc.get(**card).is_displayed())
        .map(|(_, offer)| offer)
        .collect();
    println!("{}", serde_json::to_string_pretty(&shown)?);
    Ok(())
}

async fn save(offers: Vec<FlightOffer>, index: usize, itinerary: String) -> Result<()> {
    if index >= offers.len() {
        bail!("offer index {} out of range ({} offers)", index, offers.len());
    }

    let config = Config::load().context("Failed to load config")?;
    let backend = Arc::new(HttpBackend::new(&config)?);
    tracing::info!("Saving offer {} via {}", index, config.server.base_url);

    let mut doc = Document::new();
    render_layout(&mut doc, Theme::Light);
    let itineraries = [Itinerary {
        id: itinerary.clone(),
        name: itinerary.clone(),
    }];
    let cards = render_results(&mut doc, &offers, &itineraries);
    let select_button = doc
        .class_in(cards[index], "select-flight-btn")
        .into_iter()
        .next()
        .context("rendered card has no select button")?;

    let mut page = Page::load(doc, backend, config.ui.clone());
    page.click(select_button).await;

    let modal_select = page.doc().by_id("itinerarySelect").context("save modal missing")?;
    let confirm = page.doc().by_id("confirmSaveFlight").context("save modal missing")?;
    page.choose(modal_select, &itinerary).await;
    page.click(confirm).await;

    for message in page.doc_mut().take_alerts() {
        println!("{}", message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xpedition=info,xpedition_ui=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Filter {
            offers,
            min_price,
            max_price,
            stops,
            airline,
        } => filter(read_offers(&offers)?, min_price, max_price, stops, airline),
        Command::Save {
            offers,
            index,
            itinerary,
        } => save(read_offers(&offers)?, index, itinerary).await,
    }
}
