//! Repository modules — one per table.

pub mod callback_tokens;
