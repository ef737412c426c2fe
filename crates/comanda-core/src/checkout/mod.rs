//! Checkout module.
//!
//! Contains client and note validation, order references, the order
//! snapshot, message composition, the submission lockout and handoffs.

mod guard;
mod handoff;
mod message;
mod order;
mod policy;
mod text;

pub use guard::CheckoutGuard;
pub use handoff::{
    MessageHandoff, RecordingHandoff, SentMessage, WhatsAppLink, DEFAULT_HANDOFF_BASE_URL,
};
pub use message::{MessageComposer, DEFAULT_ORDER_LABEL};
pub use order::{checkout, Order};
pub use policy::CheckoutPolicy;
pub use text::{
    generate_reference, sanitize_free_text, validate_client, MIN_CLIENT_NAME_LEN,
    REFERENCE_PREFIX_LEN,
};
