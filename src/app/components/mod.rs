pub mod button;
pub mod card;
pub mod common;
pub mod model_row;
pub mod progress_bar;

pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use common::{EmptyState, ErrorMessage, LoadingText};
pub use model_row::ModelRow;
pub use progress_bar::ProgressBar;
