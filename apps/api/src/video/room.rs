#![cfg_attr(not(test), allow(dead_code))]

//! Join/leave bookkeeping for a negotiation practice video room.
//!
//! Signalling and media are owned by the hosted video service. This session only
//! tracks which media tracks are attached where. Rendering goes through the
//! [`MediaSurface`] capability so the logic stays framework-agnostic.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub sid: String,
    pub kind: TrackKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub identity: String,
    pub tracks: Vec<Track>,
}

/// Where media tracks are rendered: a DOM container in the browser.
pub trait MediaSurface: Send {
    fn attach(&mut self, track: &Track);
    fn detach(&mut self, track: &Track);
    fn has_video(&self) -> bool;
    /// Releases a local capture track (camera/microphone preview).
    fn stop(&mut self, _track: &Track) {}
}

/// A live connection to a room on the video service.
#[async_trait]
pub trait ConnectedRoom: Send {
    fn name(&self) -> &str;
    fn local_participant(&self) -> Participant;
    fn participants(&self) -> Vec<Participant>;
    async fn disconnect(&mut self);
}

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub name: String,
    /// Preview tracks to publish instead of acquiring new ones.
    pub tracks: Vec<Track>,
}

#[async_trait]
pub trait RoomConnector: Send + Sync {
    async fn connect(
        &self,
        token: &str,
        options: ConnectOptions,
    ) -> Result<Box<dyn ConnectedRoom>, RoomError>;
}

#[derive(Debug, Error, PartialEq)]
pub enum RoomError {
    #[error("Room name is required")]
    RoomNameRequired,

    #[error("Already joined room '{0}'")]
    AlreadyJoined(String),

    #[error("Not in a room")]
    NotJoined,

    #[error("Timed out after {0:?} connecting to the video service")]
    ConnectTimeout(Duration),

    #[error("Could not connect to the video service: {0}")]
    Connect(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoomState {
    Idle,
    Joining { room_name: String },
    Joined { room_name: String },
}

/// Events pushed by the video service while the session is in a room.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    ParticipantConnected(Participant),
    TrackAdded { participant: String, track: Track },
    TrackRemoved { participant: String, track: Track },
    ParticipantDisconnected(Participant),
    Disconnected,
}

pub struct RoomSession<S: MediaSurface> {
    token: String,
    identity: String,
    local_media: S,
    remote_media: S,
    preview_tracks: Vec<Track>,
    connect_timeout: Duration,
    state: RoomState,
    room: Option<Box<dyn ConnectedRoom>>,
    local_tracks: Vec<Track>,
    remote_tracks: HashMap<String, Vec<Track>>,
}

impl<S: MediaSurface> RoomSession<S> {
    /// `token` and `identity` come from `GET /token`.
    pub fn new(token: String, identity: String, local_media: S, remote_media: S) -> Self {
        Self {
            token,
            identity,
            local_media,
            remote_media,
            preview_tracks: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            state: RoomState::Idle,
            room: None,
            local_tracks: Vec::new(),
            remote_tracks: HashMap::new(),
        }
    }

    pub fn with_preview_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.preview_tracks = tracks;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn is_joined(&self) -> bool {
        matches!(self.state, RoomState::Joined { .. })
    }

    pub fn local_media(&self) -> &S {
        &self.local_media
    }

    pub fn remote_media(&self) -> &S {
        &self.remote_media
    }

    /// Connects to `room_name`. On failure or timeout the session is back in `Idle`.
    pub async fn join(
        &mut self,
        connector: &dyn RoomConnector,
        room_name: &str,
    ) -> Result<(), RoomError> {
        if let RoomState::Joined { room_name: current } = &self.state {
            return Err(RoomError::AlreadyJoined(current.clone()));
        }
        let room_name = room_name.trim();
        if room_name.is_empty() {
            return Err(RoomError::RoomNameRequired);
        }

        info!("Joining room '{room_name}'...");
        self.state = RoomState::Joining {
            room_name: room_name.to_string(),
        };

        let options = ConnectOptions {
            name: room_name.to_string(),
            tracks: self.preview_tracks.clone(),
        };
        let attempt = tokio::time::timeout(
            self.connect_timeout,
            connector.connect(&self.token, options),
        )
        .await;

        match attempt {
            Ok(Ok(room)) => {
                self.room_joined(room);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Could not join room '{room_name}': {e}");
                self.state = RoomState::Idle;
                Err(e)
            }
            Err(_) => {
                warn!("Joining room '{room_name}' timed out");
                self.state = RoomState::Idle;
                Err(RoomError::ConnectTimeout(self.connect_timeout))
            }
        }
    }

    fn room_joined(&mut self, room: Box<dyn ConnectedRoom>) {
        let room_name = room.name().to_string();
        info!("Joined '{room_name}' as '{}'", self.identity);

        let local = room.local_participant();
        if !self.local_media.has_video() {
            for track in &local.tracks {
                self.local_media.attach(track);
            }
        }
        self.local_tracks = local.tracks;

        for participant in room.participants() {
            info!("Already in room: '{}'", participant.identity);
            for track in &participant.tracks {
                self.remote_media.attach(track);
            }
            self.remote_tracks
                .entry(participant.identity)
                .or_default()
                .extend(participant.tracks);
        }

        self.room = Some(room);
        self.state = RoomState::Joined { room_name };
    }

    pub fn handle_event(&mut self, event: RoomEvent) {
        if !self.is_joined() {
            warn!("Ignoring {event:?} outside a room");
            return;
        }

        match event {
            RoomEvent::ParticipantConnected(participant) => {
                info!("Joining: '{}'", participant.identity);
            }
            RoomEvent::TrackAdded { participant, track } => {
                info!("{participant} added track {}", track.sid);
                self.remote_media.attach(&track);
                self.remote_tracks.entry(participant).or_default().push(track);
            }
            RoomEvent::TrackRemoved { participant, track } => {
                info!("{participant} removed track {}", track.sid);
                self.remote_media.detach(&track);
                if let Some(tracks) = self.remote_tracks.get_mut(&participant) {
                    tracks.retain(|t| t.sid != track.sid);
                }
            }
            RoomEvent::ParticipantDisconnected(participant) => {
                info!("Participant '{}' left the room", participant.identity);
                let tracks = self
                    .remote_tracks
                    .remove(&participant.identity)
                    .unwrap_or(participant.tracks);
                for track in &tracks {
                    self.remote_media.detach(track);
                }
            }
            RoomEvent::Disconnected => self.teardown(),
        }
    }

    /// Disconnects from the room and detaches every track.
    pub async fn leave(&mut self) -> Result<(), RoomError> {
        let mut room = self.room.take().ok_or(RoomError::NotJoined)?;
        room.disconnect().await;
        info!("Left room '{}'", room.name());
        self.teardown();
        Ok(())
    }

    fn teardown(&mut self) {
        for track in &self.preview_tracks {
            self.local_media.stop(track);
        }
        for track in self.local_tracks.drain(..) {
            self.local_media.detach(&track);
        }
        for (_, tracks) in self.remote_tracks.drain() {
            for track in &tracks {
                self.remote_media.detach(track);
            }
        }
        self.room = None;
        self.state = RoomState::Idle;
    }
}
