pub mod check;
pub mod run;
pub mod validate;

use bounded_dispatch::runtime::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}', expected 'text' or 'json'")),
        }
    }
}

pub fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::from_name(s)
}
