//! Preview playback: the player lifecycle and result selection

use std::time::Instant;

use crate::audio::{AudioError, MediaPlayer, PlayerFactory};
use crate::model::{PlaybackSession, PlaybackState, ToastKind};

use super::AppController;

/// Owns the media player for as long as the screen is visible.
///
/// The session outlives the player so a hidden screen can pick up where it
/// left off once it is shown again.
pub struct PlaybackController {
    factory: Box<dyn PlayerFactory>,
    player: Option<Box<dyn MediaPlayer>>,
    session: PlaybackSession,
}

impl PlaybackController {
    pub fn new(factory: Box<dyn PlayerFactory>) -> Self {
        Self {
            factory,
            player: None,
            session: PlaybackSession::default(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &PlaybackState {
        &self.session.state
    }

    #[cfg(test)]
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// Switch to `url`. Whatever was playing is stopped first.
    pub fn play(&mut self, url: &str) -> Result<(), AudioError> {
        self.session.start(url.to_string());

        let Some(player) = self.player.as_mut() else {
            tracing::debug!(url, "No player, recording preview for later");
            return Ok(());
        };
        player.stop();
        player.prepare(url)
    }

    pub fn stop(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.stop();
        }
        if self.session.current_url().is_some() {
            tracing::debug!("Preview stopped");
        }
        self.session.clear();
    }

    /// True once when the current clip failed to load in the background.
    pub fn take_load_failure(&mut self) -> bool {
        self.session.current_url().is_some()
            && self.player.as_mut().is_some_and(|player| player.take_load_failure())
    }

    /// Build a player and resume the session, if any.
    pub fn on_visible(&mut self) -> Result<(), AudioError> {
        if self.player.is_some() {
            return Ok(());
        }

        let mut player = self.factory.create()?;
        player.set_play_when_ready(true);
        let player = self.player.insert(player);

        if let PlaybackState::Playing { url, position } = &self.session.state {
            tracing::info!(url = %url, position = ?position, "Resuming preview");
            player.prepare(url)?;
            player.seek_to(*position)?;
        }
        Ok(())
    }

    /// Save the playhead and give the device back.
    pub fn on_hidden(&mut self) {
        let Some(player) = self.player.take() else {
            return;
        };
        let position = player.position();
        self.session.save_position(position);
        tracing::debug!(position = ?position, "Player released");
        player.release();
    }
}

impl AppController {
    pub fn on_visible(&mut self, now: Instant) {
        match self.playback.on_visible() {
            Ok(()) => {}
            Err(AudioError::Disabled) => tracing::debug!("Audio disabled, previews are silent"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start preview player");
                self.model
                    .show_toast(format!("Audio unavailable: {e}"), ToastKind::Error, now);
            }
        }
    }

    pub fn on_hidden(&mut self) {
        self.playback.on_hidden();
    }

    /// Play the selected result and show its info dialog.
    pub(crate) fn play_selected(&mut self, now: Instant) {
        let Some(item) = self.model.selected_item().cloned() else {
            return;
        };
        let Some(url) = item.preview_url.as_deref() else {
            self.model
                .show_toast("No preview available".to_string(), ToastKind::Info, now);
            return;
        };

        let title = item.title();
        tracing::info!(track = title, url, "Playing preview");
        match self.playback.play(url) {
            Ok(()) => self
                .model
                .show_toast(format!("Playing {title}"), ToastKind::Info, now),
            Err(e) => {
                tracing::error!(error = %e, url, "Failed to prepare preview");
                self.model
                    .show_toast(format!("Audio unavailable: {e}"), ToastKind::Error, now);
            }
        }
        self.model.open_dialog(&item);
    }

    /// Surface a clip the player gave up on after `play_selected` returned.
    pub fn poll_playback(&mut self, now: Instant) {
        if !self.playback.take_load_failure() {
            return;
        }
        tracing::warn!("Preview could not be loaded");
        self.playback.stop();
        self.model
            .show_toast("Could not load preview".to_string(), ToastKind::Error, now);
    }

    /// Closing the dialog ends the preview.
    pub(crate) fn dismiss_dialog(&mut self) {
        if self.model.close_dialog() {
            self.playback.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::controller::fakes::{controller_with_results, track, FakeFactory, PlayerCall};

    fn visible_controller() -> (PlaybackController, FakeFactory) {
        let factory = FakeFactory::default();
        let mut controller = PlaybackController::new(Box::new(factory.handle()));
        controller.on_visible().unwrap();
        factory.log.borrow_mut().clear();
        (controller, factory)
    }

    #[test]
    fn visible_creates_player_that_plays_when_ready() {
        let factory = FakeFactory::default();
        let mut controller = PlaybackController::new(Box::new(factory.handle()));

        controller.on_visible().unwrap();

        assert!(controller.has_player());
        assert_eq!(
            factory.calls(),
            vec![PlayerCall::Create, PlayerCall::PlayWhenReady(true)]
        );
    }

    #[test]
    fn second_play_stops_first_exactly_once() {
        let (mut controller, factory) = visible_controller();

        controller.play("https://audio/a.m4a").unwrap();
        controller.play("https://audio/b.m4a").unwrap();

        assert_eq!(
            factory.calls(),
            vec![
                PlayerCall::Stop,
                PlayerCall::Prepare("https://audio/a.m4a".into()),
                PlayerCall::Stop,
                PlayerCall::Prepare("https://audio/b.m4a".into()),
            ]
        );
        assert_eq!(
            controller.state(),
            &PlaybackState::Playing {
                url: "https://audio/b.m4a".into(),
                position: Duration::ZERO,
            }
        );
    }

    #[test]
    fn hide_then_show_resumes_at_saved_position() {
        let (mut controller, factory) = visible_controller();
        controller.play("https://audio/a.m4a").unwrap();
        factory.position.set(Duration::from_millis(12_345));

        controller.on_hidden();
        assert!(!controller.has_player());
        controller.on_visible().unwrap();

        let calls = factory.calls();
        assert_eq!(
            &calls[2..],
            &[
                PlayerCall::Release,
                PlayerCall::Create,
                PlayerCall::PlayWhenReady(true),
                PlayerCall::Prepare("https://audio/a.m4a".into()),
                PlayerCall::Seek(Duration::from_millis(12_345)),
            ]
        );
    }

    #[test]
    fn show_without_session_prepares_nothing() {
        let (mut controller, factory) = visible_controller();

        controller.on_hidden();
        controller.on_visible().unwrap();

        assert_eq!(
            factory.calls(),
            vec![
                PlayerCall::Release,
                PlayerCall::Create,
                PlayerCall::PlayWhenReady(true),
            ]
        );
    }

    #[test]
    fn stopped_preview_does_not_resume() {
        let (mut controller, factory) = visible_controller();
        controller.play("https://audio/a.m4a").unwrap();
        controller.stop();
        assert_eq!(controller.state(), &PlaybackState::Idle);

        controller.on_hidden();
        controller.on_visible().unwrap();

        assert!(!factory
            .calls()
            .iter()
            .skip(3)
            .any(|c| matches!(c, PlayerCall::Prepare(_) | PlayerCall::Seek(_))));
    }

    #[test]
    fn play_while_hidden_only_records_intent() {
        let factory = FakeFactory::default();
        let mut controller = PlaybackController::new(Box::new(factory.handle()));

        controller.play("https://audio/a.m4a").unwrap();
        controller.stop();

        assert!(factory.calls().is_empty());
        assert_eq!(controller.state(), &PlaybackState::Idle);
    }

    #[test]
    fn repeated_visible_keeps_single_player() {
        let (mut controller, factory) = visible_controller();

        controller.on_visible().unwrap();

        assert!(factory.calls().is_empty());
    }

    #[test]
    fn unavailable_device_leaves_no_player() {
        let factory = FakeFactory {
            unavailable: true,
            ..FakeFactory::default()
        };
        let mut controller = PlaybackController::new(Box::new(factory.handle()));

        assert!(controller.on_visible().is_err());
        assert!(!controller.has_player());
        controller.play("https://audio/a.m4a").unwrap();
    }

    fn toast(controller: &AppController) -> Option<&str> {
        controller.model.ui_state().toast.as_ref().map(|t| t.message.as_str())
    }

    fn yellow() -> Vec<crate::model::ResultItem> {
        vec![track("Yellow", "Coldplay", Some("https://audio/yellow.m4a"))]
    }

    #[test]
    fn missing_output_device_shows_toast() {
        let factory = FakeFactory {
            unavailable: true,
            ..FakeFactory::default()
        };

        let controller = controller_with_results(&factory, yellow());

        assert_eq!(
            toast(&controller),
            Some("Audio unavailable: output error: no output device found")
        );
        assert!(!controller.playback().has_player());
    }

    #[test]
    fn disabled_audio_stays_quiet() {
        let factory = FakeFactory {
            disabled: true,
            ..FakeFactory::default()
        };

        let mut controller = controller_with_results(&factory, yellow());
        assert_eq!(toast(&controller), None);

        controller.play_selected(Instant::now());
        assert_eq!(toast(&controller), Some("Playing Yellow"));
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn failed_prepare_shows_toast_and_keeps_dialog() {
        let factory = FakeFactory {
            failing_prepare: true,
            ..FakeFactory::default()
        };
        let mut controller = controller_with_results(&factory, yellow());

        controller.play_selected(Instant::now());

        assert_eq!(
            toast(&controller),
            Some("Audio unavailable: player channel closed")
        );
        assert!(controller.model.is_dialog_open());
    }

    #[test]
    fn background_load_failure_stops_and_reports() {
        let factory = FakeFactory::default();
        let mut controller = controller_with_results(&factory, yellow());
        controller.play_selected(Instant::now());
        factory.log.borrow_mut().clear();

        controller.poll_playback(Instant::now());
        assert_eq!(toast(&controller), Some("Playing Yellow"));

        factory.load_failure.set(true);
        controller.poll_playback(Instant::now());

        assert_eq!(toast(&controller), Some("Could not load preview"));
        assert_eq!(controller.playback().state(), &PlaybackState::Idle);
        assert_eq!(factory.calls(), vec![PlayerCall::Stop]);

        controller.poll_playback(Instant::now());
        assert_eq!(factory.calls(), vec![PlayerCall::Stop]);
    }
}
