//! Electron-transfer game engine: transfer bookkeeping, drag gestures and
//! the per-level session the presentation layer reads from.

pub mod explanation;
pub mod gesture;
pub mod session;
pub mod state;
pub mod transfer;
pub mod view;

pub use explanation::{ExplanationRequest, ExplanationSlot, ExplanationTicket};
pub use gesture::{
    GestureController, GestureOutcome, GestureState, NoCapture, PointerCapture, PointerDevice,
    PointerEvent, PointerPhase, Viewport,
};
pub use session::{MenuEntry, Session, Simulator};
pub use state::GameState;
pub use transfer::{TargetResolution, TransferEngine, DRAG_START_MARGIN, DROP_HIT_MARGIN};
