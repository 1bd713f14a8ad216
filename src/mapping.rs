use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the category and the item id in a compound endpoint.
pub const ID_SEPARATOR: char = '/';

/// Reserved endpoint that fans out over every category.
pub const ALL_ENDPOINT: &str = "all";

/// The four content groupings. Client-facing names are English, the upstream API speaks Indonesian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    History,
    Tourism,
    Culinary,
    Events,
}

impl Category {
    /// Upstream group order; fan-out results are concatenated in this order.
    pub const ALL: [Category; 4] = [Category::History, Category::Tourism, Category::Culinary, Category::Events];

    pub fn client_name(self) -> &'static str {
        match self {
            Category::History => "history",
            Category::Tourism => "tourism",
            Category::Culinary => "culinary",
            Category::Events => "events",
        }
    }

    pub fn upstream_name(self) -> &'static str {
        match self {
            Category::History => "sejarah",
            Category::Tourism => "wisata",
            Category::Culinary => "kuliner",
            Category::Events => "event",
        }
    }

    /// Case-insensitive lookup of a client-facing name.
    pub fn from_client(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.client_name() == name)
    }

    /// Case-insensitive lookup of an upstream name.
    pub fn from_upstream(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.upstream_name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.client_name())
    }
}

/// Translate one category token; unknown tokens come back untouched.
pub fn translate_category(token: &str) -> &str {
    match Category::from_client(token) {
        Some(c) => c.upstream_name(),
        None => token,
    }
}

/// Translate a client endpoint (`history` or `history/42`) into its upstream path.
///
/// Never fails. Only the category part is looked up; the id after the first
/// separator is carried over verbatim.
pub fn translate_endpoint(endpoint: &str) -> String {
    match endpoint.split_once(ID_SEPARATOR) {
        Some((category, id)) => format!("{}{}{}", translate_category(category), ID_SEPARATOR, id),
        None => translate_category(endpoint).to_string(),
    }
}

/// Build the client-facing endpoint for a single item.
pub fn item_endpoint(category: &str, id: &str) -> String {
    format!("{}{}{}", category, ID_SEPARATOR, id)
}
