//! Search response types and the result presenter state

use serde::Deserialize;

/// JSON envelope returned by `GET {base}/search`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<ResultItem>,
}

/// A single entry from the search response
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub primary_genre_name: Option<String>,
    pub track_time_millis: Option<u64>,
    pub preview_url: Option<String>,
}

impl ResultItem {
    pub fn title(&self) -> &str {
        self.track_name
            .as_deref()
            .or(self.collection_name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn artist(&self) -> &str {
        self.artist_name.as_deref().unwrap_or("Unknown artist")
    }

    /// Album, genre and running time, whichever the API returned
    pub fn details(&self) -> String {
        let album = self
            .collection_name
            .as_deref()
            .filter(|album| *album != self.title());
        let duration = self.track_time_millis.map(|millis| {
            let seconds = millis / 1000;
            format!("{}:{:02}", seconds / 60, seconds % 60)
        });

        [album, self.primary_genre_name.as_deref(), duration.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PresenterPhase {
    #[default]
    Empty,
    Loading,
    Results,
    Error,
}

/// Which of the two mutually exclusive content elements is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibleElement {
    ResultList,
    HelpText,
}

/// Presenter state: the current result set plus grid selection
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub phase: PresenterPhase,
    pub results: Vec<ResultItem>,
    pub selected_index: usize,
}

impl ContentState {
    pub fn is_loading(&self) -> bool {
        self.phase == PresenterPhase::Loading
    }

    /// While loading, whatever was displayed before stays displayed.
    pub fn visible_element(&self) -> VisibleElement {
        match self.phase {
            PresenterPhase::Error | PresenterPhase::Empty => VisibleElement::HelpText,
            PresenterPhase::Results | PresenterPhase::Loading if !self.results.is_empty() => {
                VisibleElement::ResultList
            }
            _ => VisibleElement::HelpText,
        }
    }

    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.results.get(self.selected_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_envelope() {
        let body = r#"{
            "resultCount": 2,
            "results": [
                {"wrapperType": "track", "kind": "song", "trackId": 1,
                 "trackName": "Hey Jude", "artistName": "The Beatles",
                 "previewUrl": "https://audio.example/1.m4a", "trackTimeMillis": 431333},
                {"wrapperType": "audiobook", "collectionName": "Some Book",
                 "artistName": "Narrator"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.result_count, 2);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].title(), "Hey Jude");
        assert_eq!(
            response.results[0].preview_url.as_deref(),
            Some("https://audio.example/1.m4a")
        );
        assert_eq!(response.results[1].title(), "Some Book");
        assert_eq!(response.results[1].preview_url, None);
    }

    #[test]
    fn details_join_whatever_is_present() {
        let item = ResultItem {
            track_name: Some("Yellow".into()),
            collection_name: Some("Parachutes".into()),
            primary_genre_name: Some("Alternative".into()),
            track_time_millis: Some(266_773),
            ..Default::default()
        };
        assert_eq!(item.details(), "Parachutes · Alternative · 4:26");

        // Already the title, so not repeated
        let book = ResultItem {
            collection_name: Some("Some Book".into()),
            track_time_millis: Some(61_000),
            ..Default::default()
        };
        assert_eq!(book.details(), "1:01");
        assert_eq!(ResultItem::default().details(), "");
    }

    #[test]
    fn missing_results_array_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"resultCount": 0}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn exactly_one_element_is_visible() {
        let mut state = ContentState::default();
        assert_eq!(state.visible_element(), VisibleElement::HelpText);

        state.phase = PresenterPhase::Loading;
        assert_eq!(state.visible_element(), VisibleElement::HelpText);

        state.results = vec![ResultItem::default()];
        assert_eq!(state.visible_element(), VisibleElement::ResultList);

        state.phase = PresenterPhase::Results;
        assert_eq!(state.visible_element(), VisibleElement::ResultList);

        state.phase = PresenterPhase::Error;
        assert_eq!(state.visible_element(), VisibleElement::HelpText);
    }
}
