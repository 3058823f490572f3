pub mod settings;

pub use settings::{ACCOUNT_LABEL_SUFFIX, AccountConfig, Settings, account_label};
