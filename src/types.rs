use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::mapping::Category;
use crate::sanitize::sanitize_description;

/// One upstream record. Request-scoped, never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Untrusted HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ContentItem {
    pub fn sanitized_description(&self) -> String { sanitize_description(&self.description) }

    pub fn updated_on(&self) -> Option<NaiveDate> { self.updated_at.as_deref().and_then(parse_date) }

    pub fn created_on(&self) -> Option<NaiveDate> { self.created_at.as_deref().and_then(parse_date) }
}

// Upstream sends `null` for blank display fields.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) { return Some(dt.date_naive()); }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") { return Some(dt.date()); }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Short date as the Indonesian locale prints it (`d/m/yyyy`).
pub fn format_date_id(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// Items grouped under the four fixed category keys, upstream order kept inside each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySet {
    pub history: Vec<ContentItem>,
    pub tourism: Vec<ContentItem>,
    pub culinary: Vec<ContentItem>,
    pub events: Vec<ContentItem>,
}

impl CategorySet {
    pub fn get(&self, category: Category) -> &[ContentItem] {
        match category {
            Category::History => &self.history,
            Category::Tourism => &self.tourism,
            Category::Culinary => &self.culinary,
            Category::Events => &self.events,
        }
    }

    pub(crate) fn push(&mut self, category: Category, item: ContentItem) {
        let group = match category {
            Category::History => &mut self.history,
            Category::Tourism => &mut self.tourism,
            Category::Culinary => &mut self.culinary,
            Category::Events => &mut self.events,
        };
        group.push(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ContentItem])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total(&self) -> usize { self.iter().map(|(_, items)| items.len()).sum() }

    /// Usable for display only when at least one group has items.
    pub fn is_meaningful(&self) -> bool { self.iter().any(|(_, items)| !items.is_empty()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64) -> ContentItem {
        ContentItem { id, title: format!("t{id}"), description: String::new(), image: String::new(), category: None, created_at: None, updated_at: None }
    }

    #[test]
    fn deserializes_upstream_shape() {
        let json = serde_json::json!({
            "id": 3, "title": "Benteng Keraton", "description": "<p>x</p>", "image": "https://img/3.jpg",
            "category": "sejarah", "createdAt": "2024-11-02T08:00:00.000Z", "updatedAt": null
        });
        let it: ContentItem = serde_json::from_value(json).unwrap();
        assert_eq!(it.id, 3);
        assert_eq!(it.category.as_deref(), Some("sejarah"));
        assert_eq!(it.updated_at, None);
        assert_eq!(it.created_on(), NaiveDate::from_ymd_opt(2024, 11, 2));
    }

    #[test]
    fn missing_timestamps_are_allowed() {
        let it: ContentItem = serde_json::from_str(r#"{"id":1,"title":"a","description":"b","image":"c"}"#).unwrap();
        assert!(it.created_at.is_none());
        assert!(it.updated_on().is_none());
    }

    #[test]
    fn null_display_fields_become_empty() {
        let it: ContentItem = serde_json::from_str(r#"{"id":4,"title":null,"description":null,"image":null}"#).unwrap();
        assert_eq!(it.title, "");
        assert_eq!(it.description, "");
        assert_eq!(it.image, "");
    }

    #[test]
    fn date_parsing_and_format() {
        assert_eq!(parse_date("2025-01-05"), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(parse_date("2025-01-05T10:11:12"), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(parse_date("yesterday"), None);
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date_id(d), "5/1/2025");
    }

    #[test]
    fn meaningful_needs_one_item() {
        let mut set = CategorySet::default();
        assert!(!set.is_meaningful());
        set.push(Category::Events, item(1));
        assert!(set.is_meaningful());
        assert_eq!(set.total(), 1);
        assert_eq!(set.get(Category::Events).len(), 1);
    }

    #[test]
    fn serializes_with_fixed_keys() {
        let v = serde_json::to_value(CategorySet::default()).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["culinary", "events", "history", "tourism"]);
    }
}
