//! Parameter Management Module
//!
//! Parameter validation used by the request builder before anything is sent:
//!
//! - **Hard checks** (`validate_*`) reject a value with a validation error.
//! - **Soft checks** (`check_prompt_length*`) return a hint and never fail.
//!
//! ## Relationship with `types` Module
//!
//! - **`types/`** - data structures for requests/responses (what users send/receive)
//! - **`params/`** - validation of those values (how we check them)

pub mod validation;

pub use validation::*;
