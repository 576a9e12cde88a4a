//! Notification sounds
//!
//! The game only ever needs a single short pulse. Which game events produce one
//! is decided here, how it is played is up to the [`Notifier`].

use std::io::Write;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Brick broken or power-up collected
    Notify,
    /// Last ball fell out of the field
    LifeLost,
    /// Level cleared
    LevelClear,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Sound for a game event, if it makes one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Notify => Some(SoundEffect::Notify),
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::LevelCleared { .. } => Some(SoundEffect::LevelClear),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::BrickDestroyed { .. }
            | GameEvent::PickupSpawned { .. }
            | GameEvent::PickupCollected { .. }
            | GameEvent::EffectExpired { .. } => None,
        }
    }
}

/// Something that can play a notification
pub trait Notifier {
    fn play(&mut self, effect: SoundEffect);

    /// Play whatever sounds a batch of events calls for
    fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::from_event) {
            self.play(effect);
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }
}

/// Rings the terminal bell once per notification
pub struct TerminalBell<W: Write> {
    out: W,
    muted: bool,
}

impl TerminalBell<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, muted: false }
    }

    /// Mute/unmute the bell
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalBell<W> {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        // A failed bell is not worth interrupting the game for
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::debug!("Bell for {:?} failed: {err}", effect);
        }
    }
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}
