//! Core draft model, action reducer, and wizard navigation for Vakalath.

pub mod action;
pub mod derive;
mod error;
pub mod export;
pub mod model;
pub mod state;
pub mod store;
pub mod wizard;

pub use action::Action;
pub use error::CoreError;
pub use export::ExportView;
pub use model::{Draft, DraftId, ItemId, PartyRole};
pub use state::{DraftState, GenerationStatus};
pub use store::{DraftStore, StoreAccess, StoreHandle, StoreObserver, WeakStoreHandle};
pub use wizard::{STEP_COUNT, StepValidator, WizardStep, WizardView};
