//! Audio feedback
//!
//! Sound effects and music are plain audio files played through
//! `HtmlAudioElement`s. Native builds keep the volume bookkeeping but play
//! nothing.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// Player hops one cell
    Hop,
    /// Run over or bitten
    Squash,
    /// Fell in the river
    Plunk,
    /// Collectible or food picked up
    Coin,
    /// Extra life or goal reached
    Extra,
}

impl SoundId {
    pub const ALL: [SoundId; 5] = [
        SoundId::Hop,
        SoundId::Squash,
        SoundId::Plunk,
        SoundId::Coin,
        SoundId::Extra,
    ];

    pub fn file(&self) -> &'static str {
        match self {
            SoundId::Hop => "sounds/dp_frogger_hop.mp3",
            SoundId::Squash => "sounds/dp_frogger_squash.mp3",
            SoundId::Plunk => "sounds/dp_frogger_plunk.mp3",
            SoundId::Coin => "sounds/dp_frogger_coin.mp3",
            SoundId::Extra => "sounds/dp_frogger_extra.mp3",
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Music {
    /// Start menu theme
    Start,
    /// In-game background
    Background,
}

impl Music {
    pub fn file(&self) -> &'static str {
        match self {
            Music::Start => "sounds/dp_frogger_start.mp3",
            Music::Background => "sounds/frogger.mp3",
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play_sound(&mut self, id: SoundId);
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, id: SoundId) {
        log::trace!("Sound {:?} (no audio output)", id);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    music_muted: bool,
    current_music: Option<Music>,
    #[cfg(target_arch = "wasm32")]
    assets: web::AudioAssets,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            music_muted: false,
            current_music: None,
            #[cfg(target_arch = "wasm32")]
            assets: web::AudioAssets::load(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_music_muted(settings.music_muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Mute/unmute music only (the menu's music toggle)
    pub fn set_music_muted(&mut self, muted: bool) {
        self.music_muted = muted;
        self.sync_music();
    }

    pub fn is_music_muted(&self) -> bool {
        self.music_muted
    }

    /// Get effective sound effect volume
    pub fn effective_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.music_muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn current_music(&self) -> Option<Music> {
        self.current_music
    }

    /// Switch to a track, pausing whatever was playing
    pub fn play_music(&mut self, music: Music) {
        if self.current_music == Some(music) {
            return;
        }
        self.stop_music();
        self.current_music = Some(music);
        #[cfg(target_arch = "wasm32")]
        self.assets.play_music(music, self.effective_music_volume());
    }

    /// Pause and rewind the current track
    pub fn stop_music(&mut self) {
        if let Some(_music) = self.current_music.take() {
            #[cfg(target_arch = "wasm32")]
            self.assets.stop_music(_music);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn sync_music(&mut self) {
        if let Some(music) = self.current_music {
            self.assets.set_music_volume(music, self.effective_music_volume());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn sync_music(&mut self) {}
}

impl AudioSink for AudioManager {
    fn play_sound(&mut self, id: SoundId) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        self.assets.play_sound(id, vol);
        #[cfg(not(target_arch = "wasm32"))]
        log::trace!("Sound {:?} at volume {:.2}", id, vol);
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlAudioElement;

    use super::{Music, SoundId};

    /// Audio elements, registered as each one reports `canplaythrough`
    pub struct AudioAssets {
        sounds: Rc<RefCell<HashMap<SoundId, HtmlAudioElement>>>,
        music: HashMap<Music, HtmlAudioElement>,
    }

    impl AudioAssets {
        pub fn load() -> Self {
            let sounds = Rc::new(RefCell::new(HashMap::new()));
            for id in SoundId::ALL {
                let Ok(element) = HtmlAudioElement::new_with_src(id.file()) else {
                    log::warn!("Could not create audio element for {}", id.file());
                    continue;
                };
                let ready = sounds.clone();
                let loaded = element.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    log::debug!("Sound {:?} loaded", id);
                    ready.borrow_mut().insert(id, loaded.clone());
                });
                let _ = element.add_event_listener_with_callback(
                    "canplaythrough",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }

            let mut music = HashMap::new();
            for track in [Music::Start, Music::Background] {
                match HtmlAudioElement::new_with_src(track.file()) {
                    Ok(element) => {
                        element.set_loop(true);
                        music.insert(track, element);
                    }
                    Err(_) => log::warn!("Could not create audio element for {}", track.file()),
                }
            }

            Self { sounds, music }
        }

        /// Sounds that have not finished loading are skipped
        pub fn play_sound(&self, id: SoundId, volume: f32) {
            let sounds = self.sounds.borrow();
            let Some(element) = sounds.get(&id) else {
                return;
            };
            element.set_volume(volume as f64);
            element.set_current_time(0.0);
            if element.play().is_err() {
                log::warn!("Could not play {:?}", id);
            }
        }

        pub fn play_music(&self, music: Music, volume: f32) {
            let Some(element) = self.music.get(&music) else {
                return;
            };
            element.set_volume(volume as f64);
            // Autoplay may be refused until the first user gesture
            if element.play().is_err() {
                log::warn!("Could not start {:?} music", music);
            }
        }

        pub fn stop_music(&self, music: Music) {
            if let Some(element) = self.music.get(&music) {
                let _ = element.pause();
                element.set_current_time(0.0);
            }
        }

        pub fn set_music_volume(&self, music: Music, volume: f32) {
            if let Some(element) = self.music.get(&music) {
                element.set_volume(volume as f64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.25);
        audio.set_master_volume(0.0);
        assert_eq!(audio.effective_volume(), 0.0);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_music_mute_leaves_effects() {
        let mut audio = AudioManager::new();
        audio.set_music_muted(true);
        assert_eq!(audio.effective_music_volume(), 0.0);
        assert!(audio.effective_volume() > 0.0);
    }

    #[test]
    fn test_music_switching() {
        let mut audio = AudioManager::new();
        audio.play_music(Music::Start);
        assert_eq!(audio.current_music(), Some(Music::Start));
        audio.play_music(Music::Background);
        assert_eq!(audio.current_music(), Some(Music::Background));
        audio.stop_music();
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            music_muted: true,
            sfx_volume: 0.5,
            master_volume: 1.0,
            ..Settings::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(audio.is_music_muted());
        assert_eq!(audio.effective_volume(), 0.5);
    }
}
