macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

pub mod catalog {
    pub const SEARCH: &str = api_path!("/search");
    pub const FILTERS: &str = api_path!("/filters");
    pub const SUMMARY: &str = api_path!("/summary");

    pub mod item {
        pub const DETAIL: &str = api_path!("/item/{id}");
        pub const IMAGES: &str = api_path!("/item/{id}/images");
        pub const UPLOAD: &str = api_path!("/item/{id}/upload");
    }
}

pub mod stats {
    pub const API: &str = api_path!("/stats");
    /// Unprefixed alias kept for the presentation layer.
    pub const PAGE: &str = "/stats";
}

pub mod uploads {
    pub const ROOT: &str = "/uploads";
    pub const FILE: &str = "/uploads/{folder}/{filename}";
}

pub mod health {
    pub const PING: &str = "/ping";
    pub const HEALTH: &str = "/health";
}

pub mod utils {
    /// Substitute a `{param}` placeholder in a route template.
    pub fn replace_param(
        template: &str,
        placeholder: &str,
        value: impl AsRef<str>,
    ) -> String {
        template.replace(placeholder, value.as_ref())
    }

    /// Concrete path for a route template carrying a single `{id}`.
    pub fn item_path(template: &str, id: i64) -> String {
        replace_param(template, "{id}", id.to_string())
    }
}
