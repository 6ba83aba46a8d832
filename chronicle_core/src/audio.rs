// Soundscape playback state machine over a single audio output.
// Autoplay recovery: a rejected play is retried once muted, then unmuted after a short delay.

use serde::Serialize;

use crate::assets::{AssetResolver, SoundCategory};
use crate::types::LocationKey;

/// Narrow view of the audio element.
pub trait AudioOutput {
    /// Handle for an in-flight play attempt (a promise in the browser).
    type Pending;

    fn pause(&mut self);
    fn set_source(&mut self, url: &str);
    fn rewind(&mut self);
    fn set_loop(&mut self, looping: bool);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    /// Begin playback. The outcome is reported back through
    /// [`SoundscapePlayer::play_resolved`].
    fn play(&mut self) -> Self::Pending;
}

/// Returned when the environment refuses to start playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackBlocked;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

/// Observable player state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub track: Option<String>,
    pub status: PlaybackStatus,
    pub muted: bool,
    pub volume: f32,
    pub looping: bool,
}

/// Identifies one play attempt on one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    track: u64,
    muted_retry: bool,
}

impl PlayRequest {
    pub fn is_muted_retry(&self) -> bool {
        self.muted_retry
    }
}

/// A play attempt plus the output's handle for it.
#[derive(Debug)]
pub struct PendingPlay<P> {
    pub request: PlayRequest,
    pub pending: P,
}

/// Token for the delayed unmute after a muted retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmuteToken(u64);

/// What the caller has to do after a play attempt resolved.
#[derive(Debug)]
pub enum PlayFollowUp<P> {
    Nothing,
    /// Await the muted retry.
    Retry(PendingPlay<P>),
    /// Call [`SoundscapePlayer::unmute_elapsed`] after `delay_ms`.
    ScheduleUnmute { token: UnmuteToken, delay_ms: u32 },
    /// Both attempts were refused; playback does not start.
    GaveUp,
}

pub struct SoundscapePlayer<A: AudioOutput> {
    output: A,
    resolver: AssetResolver,
    state: PlaybackState,
    track_generation: u64,
    forced_mute: bool,
    unmute_delay_ms: u32,
}

impl<A: AudioOutput> SoundscapePlayer<A> {
    pub fn new(mut output: A, volume: f32, looping: bool, unmute_delay_ms: u32) -> Self {
        let volume = sanitize_volume(volume).unwrap_or(1.0);
        output.set_volume(volume);
        output.set_loop(looping);
        SoundscapePlayer {
            output,
            resolver: AssetResolver::new(),
            state: PlaybackState {
                track: None,
                status: PlaybackStatus::Stopped,
                muted: false,
                volume,
                looping,
            },
            track_generation: 0,
            forced_mute: false,
            unmute_delay_ms,
        }
    }

    /// Replace whatever is playing with the soundscape for `key`.
    pub fn play_for_location(&mut self, key: &LocationKey) -> PendingPlay<A::Pending> {
        let url = self.resolver.resolve_audio(key);
        self.output.pause();
        self.output.set_source(&url);
        self.output.rewind();
        self.output.set_loop(self.state.looping);
        self.output.set_volume(self.state.volume);
        self.output.set_muted(self.state.muted);

        self.track_generation += 1;
        self.forced_mute = false;
        self.state.track = Some(url);
        self.state.status = PlaybackStatus::Playing;
        self.start(false)
    }

    pub fn category_for(&self, key: &LocationKey) -> SoundCategory {
        self.resolver.sound_category(key)
    }

    fn start(&mut self, muted_retry: bool) -> PendingPlay<A::Pending> {
        PendingPlay {
            request: PlayRequest {
                track: self.track_generation,
                muted_retry,
            },
            pending: self.output.play(),
        }
    }

    /// Feed back the outcome of a play attempt.
    pub fn play_resolved(
        &mut self,
        request: PlayRequest,
        outcome: Result<(), PlaybackBlocked>,
    ) -> PlayFollowUp<A::Pending> {
        if request.track != self.track_generation {
            return PlayFollowUp::Nothing;
        }

        match outcome {
            Ok(()) => {
                if self.state.status != PlaybackStatus::Playing {
                    // Paused by the user while the attempt was in flight.
                    self.output.pause();
                    self.release_forced_mute();
                    return PlayFollowUp::Nothing;
                }
                if request.muted_retry {
                    PlayFollowUp::ScheduleUnmute {
                        token: UnmuteToken(request.track),
                        delay_ms: self.unmute_delay_ms,
                    }
                } else {
                    PlayFollowUp::Nothing
                }
            }
            Err(PlaybackBlocked) if self.state.status != PlaybackStatus::Playing => {
                self.release_forced_mute();
                PlayFollowUp::Nothing
            }
            Err(PlaybackBlocked) if !request.muted_retry => {
                log::info!("Autoplay blocked, retrying muted");
                self.forced_mute = true;
                self.output.set_muted(true);
                PlayFollowUp::Retry(self.start(true))
            }
            Err(PlaybackBlocked) => {
                log::warn!("Muted playback also blocked; soundscape not started");
                self.release_forced_mute();
                self.state.status = PlaybackStatus::Stopped;
                PlayFollowUp::GaveUp
            }
        }
    }

    /// Lift the mute forced by the autoplay retry, unless the track changed since.
    pub fn unmute_elapsed(&mut self, token: UnmuteToken) {
        if token.0 == self.track_generation {
            self.release_forced_mute();
        }
    }

    /// Hand the output's mute back to the user's preference.
    fn release_forced_mute(&mut self) {
        if self.forced_mute {
            self.forced_mute = false;
            self.output.set_muted(self.state.muted);
        }
    }

    /// Pause if playing, otherwise resume the current track.
    pub fn toggle_play_pause(&mut self) -> Option<PendingPlay<A::Pending>> {
        match self.state.status {
            PlaybackStatus::Playing => {
                self.output.pause();
                self.state.status = PlaybackStatus::Paused;
                None
            }
            PlaybackStatus::Paused | PlaybackStatus::Stopped => {
                self.state.track.as_ref()?;
                self.state.status = PlaybackStatus::Playing;
                Some(self.start(false))
            }
        }
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.state.muted);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.forced_mute = false;
        self.state.muted = muted;
        self.output.set_muted(muted);
    }

    /// Set volume in `0.0..=1.0`; out-of-range values are clamped, NaN ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if let Some(volume) = sanitize_volume(volume) {
            self.state.volume = volume;
            self.output.set_volume(volume);
        }
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.state.looping = looping;
        self.output.set_loop(looping);
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn play_pause_label(&self) -> &'static str {
        match self.state.status {
            PlaybackStatus::Playing => "⏸ Pause",
            PlaybackStatus::Paused | PlaybackStatus::Stopped => "▶ Play",
        }
    }

    pub fn mute_label(&self) -> &'static str {
        if self.state.muted {
            "🔇 Unmute"
        } else {
            "🔈 Mute"
        }
    }

    pub fn output(&self) -> &A {
        &self.output
    }
}

fn sanitize_volume(volume: f32) -> Option<f32> {
    if volume.is_nan() {
        None
    } else {
        Some(volume.clamp(0.0, 1.0))
    }
}
