//! In-memory stand-ins for the search API and the audio device

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::AppController;
use crate::audio::{AudioError, MediaPlayer, PlayerFactory};
use crate::model::{ResultItem, SearchError, SearchResponse, SearchService};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlayerCall {
    Create,
    PlayWhenReady(bool),
    Prepare(String),
    Seek(Duration),
    Stop,
    Release,
}

pub(crate) type CallLog = Rc<RefCell<Vec<PlayerCall>>>;

pub(crate) struct FakePlayer {
    log: CallLog,
    position: Rc<Cell<Duration>>,
    load_failure: Rc<Cell<bool>>,
    failing_prepare: bool,
}

impl MediaPlayer for FakePlayer {
    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.log.borrow_mut().push(PlayerCall::PlayWhenReady(play_when_ready));
    }

    fn prepare(&mut self, url: &str) -> Result<(), AudioError> {
        self.log.borrow_mut().push(PlayerCall::Prepare(url.to_string()));
        if self.failing_prepare {
            return Err(AudioError::ChannelClosed);
        }
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), AudioError> {
        self.log.borrow_mut().push(PlayerCall::Seek(position));
        Ok(())
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(PlayerCall::Stop);
    }

    fn position(&self) -> Duration {
        self.position.get()
    }

    fn take_load_failure(&mut self) -> bool {
        self.load_failure.replace(false)
    }

    fn release(self: Box<Self>) {
        self.log.borrow_mut().push(PlayerCall::Release);
    }
}

/// Hands out `FakePlayer`s that all write to one call log.
/// `position` is what every player reports as its playhead, and setting
/// `load_failure` makes the current clip fail in the background.
#[derive(Default)]
pub(crate) struct FakeFactory {
    pub log: CallLog,
    pub position: Rc<Cell<Duration>>,
    pub load_failure: Rc<Cell<bool>>,
    pub unavailable: bool,
    pub disabled: bool,
    pub failing_prepare: bool,
}

impl FakeFactory {
    pub fn calls(&self) -> Vec<PlayerCall> {
        self.log.borrow().clone()
    }

    pub fn handle(&self) -> FakeFactory {
        FakeFactory {
            log: Rc::clone(&self.log),
            position: Rc::clone(&self.position),
            load_failure: Rc::clone(&self.load_failure),
            unavailable: self.unavailable,
            disabled: self.disabled,
            failing_prepare: self.failing_prepare,
        }
    }
}

impl PlayerFactory for FakeFactory {
    fn create(&self) -> Result<Box<dyn MediaPlayer>, AudioError> {
        if self.disabled {
            return Err(AudioError::Disabled);
        }
        if self.unavailable {
            return Err(AudioError::Output("no output device found".into()));
        }
        self.log.borrow_mut().push(PlayerCall::Create);
        Ok(Box::new(FakePlayer {
            log: Rc::clone(&self.log),
            position: Rc::clone(&self.position),
            load_failure: Rc::clone(&self.load_failure),
            failing_prepare: self.failing_prepare,
        }))
    }
}

/// Records every term and answers with a fixed result set
#[derive(Default)]
pub(crate) struct FakeSearch {
    pub terms: Mutex<Vec<String>>,
    pub results: Vec<ResultItem>,
    pub offline: bool,
}

impl FakeSearch {
    pub fn with_results(results: Vec<ResultItem>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn terms(&self) -> Vec<String> {
        self.terms.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchService for FakeSearch {
    async fn search(&self, term: &str) -> Result<SearchResponse, SearchError> {
        if let Ok(mut terms) = self.terms.lock() {
            terms.push(term.to_string());
        }
        if self.offline {
            return Err(SearchError::Network(Box::new(std::io::Error::other("offline"))));
        }
        Ok(SearchResponse {
            result_count: self.results.len() as u32,
            results: self.results.clone(),
        })
    }
}

pub(crate) fn track(name: &str, artist: &str, preview: Option<&str>) -> ResultItem {
    ResultItem {
        track_name: Some(name.to_string()),
        artist_name: Some(artist.to_string()),
        preview_url: preview.map(str::to_string),
        ..ResultItem::default()
    }
}

/// A visible controller showing `results`, focus on the grid and the
/// call log cleared.
pub(crate) fn controller_with_results(factory: &FakeFactory, results: Vec<ResultItem>) -> AppController {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut controller = AppController::new(
        Arc::new(FakeSearch::default()),
        Box::new(factory.handle()),
        Duration::from_millis(555),
        tx,
    );
    controller.on_visible(Instant::now());
    factory.log.borrow_mut().clear();

    let generation = controller.model.begin_search();
    let response = SearchResponse {
        result_count: results.len() as u32,
        results,
    };
    controller
        .model
        .apply_search_result(generation, Ok(response), Instant::now());
    controller.set_viewport(120, 30);
    controller
}
