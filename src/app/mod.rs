//! Application runtime composition modules.

pub(crate) mod inspect;
pub(crate) mod runtime;
pub(crate) mod terminal;
