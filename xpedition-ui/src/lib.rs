pub mod appearance;
pub mod dom;
pub mod error;
pub mod filter_panel;
pub mod page;
pub mod page_template;
pub mod save_workflow;
pub mod search_form;
pub mod settings_panel;

#[cfg(test)]
mod testing;

pub use dom::{Display, Document, Element, ElementKey};
pub use error::UiError;
pub use filter_panel::FilterEngine;
pub use page::{EventResult, Page, PageEvent};
pub use save_workflow::{PendingSave, SaveOutcome, SaveState, SaveWorkflow};
pub use search_form::SearchForm;
pub use settings_panel::{SettingsOutcome, SettingsPanel};
