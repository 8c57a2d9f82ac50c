mod env;
pub use env::EnvSettings;

mod file;
pub use file::FileSettings;

mod settings;
pub use settings::Settings;

mod errors;
pub use errors::SettingsError;
