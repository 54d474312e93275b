pub mod draw;
pub mod events;
pub mod input;
pub mod state;

pub use draw::render_to_buffer;
pub use events::{handle_key, run};
pub use input::{handle_text_input_key, TextInput};
pub use state::{App, Focus};
