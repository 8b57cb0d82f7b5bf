pub mod dashboard;
pub mod home;
pub mod models;
pub mod not_found;
pub mod transcribe;
pub mod translate;

pub use dashboard::Dashboard;
pub use home::Home;
pub use models::Models;
pub use not_found::PageNotFound;
pub use transcribe::Transcribe;
pub use translate::Translate;
