mod keybindings;

pub use keybindings::{action_from_name, load_keybindings, KeyCombo, KeybindingConfig};
