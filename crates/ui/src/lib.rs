pub mod affordance;
pub mod bridge;

pub use affordance::{
    resolve_action, ConsentAction, EventNode, ACCEPT_MARKER, DISMISS_MARKER, REJECT_MARKER,
};
pub use bridge::{
    PromptSurface, PromptVisibility, UiBridge, DEFAULT_TRANSITION_MS, OPEN_CLASS,
    PROMPT_ELEMENT_ID,
};
