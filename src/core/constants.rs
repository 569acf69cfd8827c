pub const API_KEY_ENV_VAR: &str = "DIAL_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "DIAL_URL";
pub const DEFAULT_BASE_URL: &str = "https://ai-proxy.lab.epam.com";

pub const API_KEY_HEADER: &str = "Api-Key";

pub mod bucket {
    pub const BUCKET_ENDPOINT: &str = "/v1/bucket";
    pub const FILES_PREFIX: &str = "/v1/files";
    pub const API_VERSION_PREFIX: &str = "/v1";
    /// Response fields that may carry the bucket id, in precedence order.
    pub const BUCKET_FIELDS: [&str; 2] = ["appdata", "bucket"];
}

pub mod completions {
    pub const DEPLOYMENTS_PREFIX: &str = "/openai/deployments";
    pub const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";
}
