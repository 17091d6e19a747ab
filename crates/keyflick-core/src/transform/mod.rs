// Keyflick Transform Module
// Modifier transforms and their memoized resolution

pub mod cache;
pub mod deadkeys;
pub mod resolver;
pub mod tables;

pub use cache::ResolutionCache;
pub use resolver::{apply_modifier, ModifierResolver};
pub use tables::{map_char, CharTable};
