use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::config::NotionProperties;
use crate::models::AnalysisResult;

/// Body of `POST /v1/pages` for one analysed sentence
#[derive(Debug, Clone, Serialize)]
pub struct NotionPageRequest {
    pub parent: PageParent,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageParent {
    pub database_id: String,
}

/// Values written into one database row
#[derive(Debug, Clone)]
pub struct PageContent<'a> {
    pub sentence: &'a str,
    pub translation: &'a str,
    pub date: NaiveDate,
    pub analysis: &'a AnalysisResult,
}

impl NotionPageRequest {
    pub fn new(database_id: &str, names: &NotionProperties, content: &PageContent<'_>) -> Self {
        let mut properties = Map::new();
        properties.insert(
            names.sentence.clone(),
            json!({ "title": [{ "text": { "content": content.sentence } }] }),
        );
        properties.insert(names.translation.clone(), rich_text(content.translation));
        properties.insert(
            names.date.clone(),
            json!({ "date": { "start": content.date.format("%Y-%m-%d").to_string() } }),
        );
        properties.insert(
            names.category.clone(),
            json!({ "multi_select": [{ "name": content.analysis.category.as_str() }] }),
        );
        properties.insert(names.analysis.clone(), rich_text(&content.analysis.analysis));

        Self {
            parent: PageParent {
                database_id: database_id.to_string(),
            },
            properties,
        }
    }
}

fn rich_text(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_page_request_shape() {
        let analysis = AnalysisResult::new(Category::Flapping, "water の t が d に聞こえる");
        let content = PageContent {
            sentence: "Get some water.",
            translation: "水を取って。",
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            analysis: &analysis,
        };

        let request = NotionPageRequest::new("db-123", &NotionProperties::default(), &content);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["parent"]["database_id"], "db-123");
        let props = &body["properties"];
        assert_eq!(props["English study"]["title"][0]["text"]["content"], "Get some water.");
        assert_eq!(props["日本語訳"]["rich_text"][0]["text"]["content"], "水を取って。");
        assert_eq!(props["日付"]["date"]["start"], "2026-03-09");
        assert_eq!(props["エラーカテゴリ"]["multi_select"][0]["name"], "Flapping");
        assert_eq!(
            props["分析"]["rich_text"][0]["text"]["content"],
            "water の t が d に聞こえる"
        );
        assert_eq!(props.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_custom_property_names() {
        let analysis = AnalysisResult::error("API Error 500");
        let names = NotionProperties {
            sentence: "Phrase".to_string(),
            category: "Tags".to_string(),
            ..Default::default()
        };
        let content = PageContent {
            sentence: "s",
            translation: "t",
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            analysis: &analysis,
        };

        let body = serde_json::to_value(NotionPageRequest::new("db", &names, &content)).unwrap();
        assert_eq!(body["properties"]["Phrase"]["title"][0]["text"]["content"], "s");
        assert_eq!(body["properties"]["Tags"]["multi_select"][0]["name"], "Error");
    }
}
