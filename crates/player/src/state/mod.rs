//! Client-side mirrors of authoritative state.

pub mod inventory_store;
pub mod sequencer;
pub mod sheet_store;

pub use inventory_store::InventoryMirror;
pub use sequencer::{RequestSequencer, RequestTag};
pub use sheet_store::{CharacterSheetStore, SheetState};
