//! Rodio-based clip player
//!
//! Each playback handle owns a worker thread holding the output stream and
//! sink, since `rodio::OutputStream` is not `Send`. The handle drives it
//! over a command channel and the worker reports status on a fixed tick.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink, Source};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::ports::{
    PlaybackError, PlaybackHandle, PlaybackOptions, Player, StatusCallback,
};
use crate::domain::clip::ClipReference;
use crate::domain::playback::EngineStatus;

type Reply = oneshot::Sender<Result<(), PlaybackError>>;

/// Status subscriber; `None` once unsubscribed
type Subscription = Arc<StdMutex<Option<StatusCallback>>>;

enum Command {
    Play(Reply),
    Seek(u64, Reply),
    Release(oneshot::Sender<()>),
}

/// Clip player using the default rodio output device
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Player for RodioPlayer {
    type Handle = RodioPlaybackHandle;

    async fn create_playback(
        &self,
        clip: &ClipReference,
        options: PlaybackOptions,
        on_status: StatusCallback,
    ) -> Result<RodioPlaybackHandle, PlaybackError> {
        let path = clip.as_path().to_path_buf();
        let subscription: Subscription = Arc::new(StdMutex::new(Some(on_status)));
        let (command_tx, command_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        let worker_subscription = Arc::clone(&subscription);
        std::thread::spawn(move || {
            run_worker(path, options, worker_subscription, command_rx, ready_tx)
        });

        ready_rx
            .await
            .map_err(|_| PlaybackError::PlaybackFailed("playback thread exited".into()))??;

        debug!(clip = %clip, "clip loaded");
        Ok(RodioPlaybackHandle {
            commands: Some(command_tx),
            subscription,
        })
    }
}

/// Handle to one loaded clip
pub struct RodioPlaybackHandle {
    commands: Option<mpsc::Sender<Command>>,
    subscription: Subscription,
}

impl RodioPlaybackHandle {
    async fn request(&self, command: impl FnOnce(Reply) -> Command) -> Result<(), PlaybackError> {
        let commands = self.commands.as_ref().ok_or(PlaybackError::Released)?;
        let (reply_tx, reply_rx) = oneshot::channel();
        commands
            .send(command(reply_tx))
            .map_err(|_| PlaybackError::Released)?;
        reply_rx.await.map_err(|_| PlaybackError::Released)?
    }
}

#[async_trait]
impl PlaybackHandle for RodioPlaybackHandle {
    async fn play(&self) -> Result<(), PlaybackError> {
        self.request(Command::Play).await
    }

    async fn seek_to(&self, position_ms: u64) -> Result<(), PlaybackError> {
        self.request(|reply| Command::Seek(position_ms, reply)).await
    }

    fn unsubscribe_status(&self) {
        // the worker emits while holding this lock
        let mut subscriber = self
            .subscription
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *subscriber = None;
    }

    async fn release(&mut self) -> Result<(), PlaybackError> {
        let Some(commands) = self.commands.take() else {
            return Ok(());
        };
        let (done_tx, done_rx) = oneshot::channel();
        if commands.send(Command::Release(done_tx)).is_err() {
            // worker already gone
            return Ok(());
        }
        let _ = done_rx.await;
        Ok(())
    }
}

impl Drop for RodioPlaybackHandle {
    fn drop(&mut self) {
        self.unsubscribe_status();
    }
}

fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
    let file = File::open(path)
        .map_err(|e| PlaybackError::OpenFailed(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::DecodeFailed(format!("{}: {}", path.display(), e)))
}

/// Output side of a loaded clip, owned by the worker thread
struct Loaded {
    // dropping the stream stops audio, so it lives as long as the sink
    _stream: OutputStream,
    sink: Sink,
    path: PathBuf,
    duration: Option<Duration>,
}

impl Loaded {
    fn open(path: PathBuf, autoplay: bool) -> Result<Self, PlaybackError> {
        let source = open_source(&path)?;
        let duration = source.total_duration();

        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
        if !autoplay {
            sink.pause();
        }
        sink.append(source);

        Ok(Self {
            _stream: stream,
            sink,
            path,
            duration,
        })
    }

    /// Queue the clip again once the sink has drained it
    fn reload_if_finished(&self) -> Result<(), PlaybackError> {
        if self.sink.empty() {
            self.sink.append(open_source(&self.path)?);
        }
        Ok(())
    }

    fn play(&self) -> Result<(), PlaybackError> {
        self.reload_if_finished()?;
        self.sink.play();
        Ok(())
    }

    fn seek(&self, position_ms: u64) -> Result<(), PlaybackError> {
        let was_finished = self.sink.empty();
        self.reload_if_finished()?;
        if was_finished {
            // seeking a finished clip parks it at the target
            self.sink.pause();
        }
        let target = match self.duration {
            Some(duration) => Duration::from_millis(position_ms).min(duration),
            None => Duration::from_millis(position_ms),
        };
        self.sink
            .try_seek(target)
            .map_err(|e| PlaybackError::SeekFailed(e.to_string()))
    }

    fn status(&self) -> EngineStatus {
        let duration_ms = self.duration.map(|d| d.as_millis() as u64);
        let mut position_ms = self.sink.get_pos().as_millis() as u64;
        if let Some(duration_ms) = duration_ms {
            position_ms = position_ms.min(duration_ms);
        }
        EngineStatus {
            is_loaded: true,
            position_ms,
            duration_ms,
            is_playing: !self.sink.is_paused() && !self.sink.empty(),
        }
    }
}

/// Deliver a status if it differs from the last one delivered
fn emit(subscription: &Subscription, last: &mut Option<EngineStatus>, status: EngineStatus) {
    if *last == Some(status) {
        return;
    }
    let subscriber = subscription
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(callback) = subscriber.as_ref() {
        callback(status);
    }
    *last = Some(status);
}

fn run_worker(
    path: PathBuf,
    options: PlaybackOptions,
    subscription: Subscription,
    commands: mpsc::Receiver<Command>,
    ready: oneshot::Sender<Result<(), PlaybackError>>,
) {
    let loaded = match Loaded::open(path, options.autoplay) {
        Ok(loaded) => {
            let _ = ready.send(Ok(()));
            loaded
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    let tick = options.status_interval.max(Duration::from_millis(10));
    let mut last = None;
    emit(&subscription, &mut last, loaded.status());

    loop {
        match commands.recv_timeout(tick) {
            Ok(Command::Play(reply)) => {
                let result = loaded.play();
                let _ = reply.send(result);
            }
            Ok(Command::Seek(position_ms, reply)) => {
                let result = loaded.seek(position_ms);
                if let Err(e) = &result {
                    warn!(path = %loaded.path.display(), error = %e, "seek rejected");
                }
                let _ = reply.send(result);
            }
            Ok(Command::Release(done)) => {
                loaded.sink.stop();
                let _ = done.send(());
                break;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                loaded.sink.stop();
                break;
            }
        }
        emit(&subscription, &mut last, loaded.status());
    }
    debug!(path = %loaded.path.display(), "playback worker stopped");
}
