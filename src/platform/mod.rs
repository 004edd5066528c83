//! Platform collaborators
//!
//! The simulation never talks to the page. It queues `GameEvent`s, and
//! `dispatch_events` turns them into sounds, transient messages and overlay
//! panel changes through the sinks defined here.

pub mod clock;
pub mod input;

pub use clock::FrameClock;

use crate::audio::{AudioSink, SoundId};
use crate::sim::{GameEvent, HazardKind, HitCause};

/// Overlay panels of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Dimmed backdrop behind menus
    Overlay,
    /// Start menu with character selection
    GameStart,
    GameOver,
    /// Score/lives/food HUD
    Stats,
}

impl Panel {
    /// DOM id of the panel element
    pub fn element_id(&self) -> &'static str {
        match self {
            Panel::Overlay => "overlay",
            Panel::GameStart => "game-start",
            Panel::GameOver => "game-over",
            Panel::Stats => "stats",
        }
    }
}

/// Text and overlay output
pub trait MessageSink {
    fn show_message(&mut self, text: &str);
    fn show(&mut self, panel: Panel);
    fn hide(&mut self, panel: Panel);
}

/// Seconds a transient message stays up
pub const MESSAGE_SECONDS: f32 = 1.5;

/// The single transient message line, cleared after a timeout
#[derive(Debug, Clone, Default)]
pub struct TransientMessage {
    text: Option<String>,
    remaining: f32,
}

impl TransientMessage {
    pub fn set(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.remaining = MESSAGE_SECONDS;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Count down; returns true on the frame the message expires
    pub fn update(&mut self, dt: f32) -> bool {
        if self.text.is_none() {
            return false;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        self.text = None;
        true
    }
}

/// Show/hide the panels for starting (or restarting) play
pub fn enter_play(messages: &mut dyn MessageSink) {
    messages.hide(Panel::GameOver);
    messages.hide(Panel::Overlay);
    messages.hide(Panel::GameStart);
    messages.show(Panel::Stats);
}

/// Show/hide the panels for the start menu
pub fn enter_menu(messages: &mut dyn MessageSink) {
    messages.hide(Panel::GameOver);
    messages.hide(Panel::Stats);
    messages.show(Panel::GameStart);
    messages.show(Panel::Overlay);
}

/// Sound for an event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundId> {
    match event {
        GameEvent::Hop { .. } => Some(SoundId::Hop),
        GameEvent::PlayerHit {
            cause: HitCause::Water,
            ..
        } => Some(SoundId::Plunk),
        GameEvent::PlayerHit { .. } => Some(SoundId::Squash),
        GameEvent::Collected { .. } | GameEvent::FoodEaten { .. } => Some(SoundId::Coin),
        GameEvent::ExtraLife { .. } | GameEvent::ReachedGoal { .. } => Some(SoundId::Extra),
        GameEvent::GameOver { .. } | GameEvent::Reset => None,
    }
}

/// Transient message text for an event, if any
pub fn message_for(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::PlayerHit {
            cause: HitCause::Water,
            penalty,
            ..
        } => Some(format!("Splash! You fell in the water. -{penalty}")),
        GameEvent::PlayerHit {
            cause: HitCause::Hazard(HazardKind::Predator),
            penalty,
            ..
        } => Some(format!("Eaten by a predator! -{penalty}")),
        GameEvent::PlayerHit {
            cause: HitCause::Hazard(kind),
            penalty,
            ..
        } => Some(format!("Hit by a {}! -{penalty}", kind.name())),
        GameEvent::ReachedGoal { points } => Some(format!("Made it across! +{points}")),
        GameEvent::Collected { kind, points } => Some(format!("Got the {}! +{points}", kind.name())),
        GameEvent::ExtraLife { .. } => Some("Extra life!".to_string()),
        GameEvent::Hop { .. }
        | GameEvent::FoodEaten { .. }
        | GameEvent::GameOver { .. }
        | GameEvent::Reset => None,
    }
}

/// Route queued events to the audio and message sinks
pub fn dispatch_events(
    events: &[GameEvent],
    audio: &mut dyn AudioSink,
    messages: &mut dyn MessageSink,
) {
    for event in events {
        if let Some(sound) = sound_for(event) {
            audio.play_sound(sound);
        }
        if let Some(text) = message_for(event) {
            messages.show_message(&text);
        }
        match event {
            GameEvent::GameOver { score } => {
                log::info!("Showing game over (score {})", score);
                messages.hide(Panel::Stats);
                messages.show(Panel::GameOver);
                messages.show(Panel::Overlay);
            }
            GameEvent::Reset => enter_play(messages),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CollectibleKind, Direction};

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<SoundId>,
        messages: Vec<String>,
        shown: Vec<Panel>,
        hidden: Vec<Panel>,
    }

    impl AudioSink for Recorder {
        fn play_sound(&mut self, id: SoundId) {
            self.sounds.push(id);
        }
    }

    impl MessageSink for Recorder {
        fn show_message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }

        fn show(&mut self, panel: Panel) {
            self.shown.push(panel);
        }

        fn hide(&mut self, panel: Panel) {
            self.hidden.push(panel);
        }
    }

    #[test]
    fn test_dispatch_routes_sounds_and_messages() {
        let events = [
            GameEvent::Hop {
                direction: Direction::Up,
            },
            GameEvent::PlayerHit {
                cause: HitCause::Hazard(HazardKind::Truck),
                penalty: 50,
                lives_left: 2,
            },
            GameEvent::PlayerHit {
                cause: HitCause::Water,
                penalty: 25,
                lives_left: 1,
            },
            GameEvent::Collected {
                kind: CollectibleKind::Key,
                points: 75,
            },
        ];
        let mut audio = Recorder::default();
        let mut messages = Recorder::default();
        dispatch_events(&events, &mut audio, &mut messages);

        assert_eq!(
            audio.sounds,
            vec![SoundId::Hop, SoundId::Squash, SoundId::Plunk, SoundId::Coin]
        );
        assert_eq!(
            messages.messages,
            vec![
                "Hit by a truck! -50",
                "Splash! You fell in the water. -25",
                "Got the key! +75",
            ]
        );
        assert!(messages.shown.is_empty());
    }

    #[test]
    fn test_game_over_and_reset_panels() {
        let mut audio = Recorder::default();
        let mut messages = Recorder::default();
        dispatch_events(&[GameEvent::GameOver { score: 10 }], &mut audio, &mut messages);
        assert_eq!(messages.shown, vec![Panel::GameOver, Panel::Overlay]);
        assert_eq!(messages.hidden, vec![Panel::Stats]);

        let mut messages = Recorder::default();
        dispatch_events(&[GameEvent::Reset], &mut audio, &mut messages);
        assert_eq!(messages.shown, vec![Panel::Stats]);
        assert!(messages.hidden.contains(&Panel::GameOver));
        assert!(audio.sounds.is_empty());
    }

    #[test]
    fn test_transient_message_expires() {
        let mut message = TransientMessage::default();
        assert!(!message.update(1.0));
        message.set("Extra life!");
        assert_eq!(message.text(), Some("Extra life!"));
        assert!(!message.update(1.0));
        assert!(message.update(1.0));
        assert_eq!(message.text(), None);
        assert!(!message.update(1.0));
    }
}
