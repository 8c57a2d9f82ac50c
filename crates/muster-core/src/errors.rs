use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("no address field configured, classification cannot extract host addresses")]
    MissingAddressField,

    #[error("bound rule \"{0}\" is not provided by the rule set")]
    UnknownBoundRule(String),
}
