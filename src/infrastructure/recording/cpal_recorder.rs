//! Cross-platform microphone recorder using cpal
//!
//! Captures mono PCM at the device rate, resamples to the quality preset's
//! rate on stop and writes a WAV clip into the clips directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex as StdMutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::wav_writer::write_wav;
use crate::application::ports::{
    AudioMode, Recorder, RecordingError, RecordingHandle, RecordingOptions,
};
use crate::domain::recording::RecordingQuality;

/// Microphone recorder backed by the default cpal input device
pub struct CpalRecorder {
    /// Distinguishes clips started within the same millisecond
    sequence: AtomicU64,
}

impl CpalRecorder {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an input configuration, preferring fewer channels and a range
    /// that includes the preset's rate so no resampling is needed.
    fn get_input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let includes = |config: &cpal::SupportedStreamConfigRange| {
            config.min_sample_rate().0 <= target_rate && config.max_sample_rate().0 >= target_rate
        };

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;
        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate = includes(&config) && !includes(current);
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable config found".into(),
        ))?;

        let sample_rate = if includes(&config_range) {
            SampleRate(target_rate)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    fn clip_path(&self, directory: &std::path::Path) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        directory.join(format!("voice-note-{}-{}.wav", millis, seq))
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mix interleaved frames down to mono
pub(crate) fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|chunk| {
            let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
            (sum / chunk.len() as i32) as i16
        })
        .collect()
}

/// Resample mono audio between rates
pub(crate) fn resample_to_rate(
    samples: &[i16],
    source_rate: u32,
    target_rate: u32,
) -> Result<Vec<i16>, RecordingError> {
    if source_rate == target_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = target_rate as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| RecordingError::FinalizeFailed(format!("Resampler init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());
        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        chunk.resize(frames_needed, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| RecordingError::FinalizeFailed(format!("Resampling failed: {}", e)))?;

        output.extend(
            resampled[0]
                .iter()
                .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16),
        );
        input_pos = end_pos;
    }

    output.truncate(output_len);
    Ok(output)
}

#[async_trait]
impl Recorder for CpalRecorder {
    type Handle = CpalRecordingHandle;

    async fn configure(&self, mode: AudioMode) -> Result<(), RecordingError> {
        if !mode.allows_recording {
            return Err(RecordingError::ConfigureFailed(
                "audio mode does not allow recording".into(),
            ));
        }
        // desktop hosts have no silent switch; output always plays
        debug!(
            plays_in_silent_mode = mode.plays_in_silent_mode,
            "audio mode configured"
        );
        Ok(())
    }

    async fn create_recording(
        &self,
        options: &RecordingOptions,
    ) -> Result<CpalRecordingHandle, RecordingError> {
        tokio::fs::create_dir_all(&options.directory)
            .await
            .map_err(|e| {
                RecordingError::StartFailed(format!(
                    "Failed to create {}: {}",
                    options.directory.display(),
                    e
                ))
            })?;

        let path = self.clip_path(&options.directory);
        let handle = CpalRecordingHandle::start(path, options.quality).await?;
        info!(path = %handle.path.display(), "microphone capture started");
        Ok(handle)
    }
}

/// One in-progress capture.
///
/// The cpal stream is not `Send`, so it lives on its own thread until the
/// handle signals it to stop.
pub struct CpalRecordingHandle {
    path: PathBuf,
    quality: RecordingQuality,
    /// Recorded audio samples (mono, i16, at device sample rate)
    samples: Arc<StdMutex<Vec<i16>>>,
    device_sample_rate: Arc<AtomicU32>,
    is_capturing: Arc<AtomicBool>,
    stop_tx: Option<mpsc::Sender<()>>,
    finished: bool,
}

impl CpalRecordingHandle {
    async fn start(path: PathBuf, quality: RecordingQuality) -> Result<Self, RecordingError> {
        let samples = Arc::new(StdMutex::new(Vec::new()));
        let device_sample_rate = Arc::new(AtomicU32::new(0));
        let is_capturing = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = oneshot::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let buffer = Arc::clone(&samples);
        let rate = Arc::clone(&device_sample_rate);
        let capturing = Arc::clone(&is_capturing);
        std::thread::spawn(move || {
            let stream = match build_stream(quality.sample_rate(), buffer, capturing) {
                Ok((stream, sample_rate)) => {
                    rate.store(sample_rate, Ordering::SeqCst);
                    let _ = ready_tx.send(Ok(()));
                    stream
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            // blocks until stop is signalled or the handle is dropped
            let _ = stop_rx.recv();
            drop(stream);
        });

        ready_rx
            .await
            .map_err(|_| RecordingError::StartFailed("capture thread exited".into()))??;

        Ok(Self {
            path,
            quality,
            samples,
            device_sample_rate,
            is_capturing,
            stop_tx: Some(stop_tx),
            finished: false,
        })
    }

    /// Stop the device stream; captured samples are kept
    fn stop_capture(&mut self) {
        self.is_capturing.store(false, Ordering::SeqCst);
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}

/// Duration of `samples` mono samples at `sample_rate`; 0 before the rate is known
fn captured_ms(samples: usize, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    samples as u64 * 1000 / sample_rate as u64
}

/// Lock the sample buffer, recovering it if a capture callback panicked
fn lock_samples(buffer: &StdMutex<Vec<i16>>) -> MutexGuard<'_, Vec<i16>> {
    buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn build_stream(
    target_rate: u32,
    buffer: Arc<StdMutex<Vec<i16>>>,
    is_capturing: Arc<AtomicBool>,
) -> Result<(cpal::Stream, u32), RecordingError> {
    let device = CpalRecorder::get_input_device()?;
    let (config, sample_format) = CpalRecorder::get_input_config(&device, target_rate)?;
    let sample_rate = config.sample_rate.0;
    let channels = config.channels;
    let on_error = |err: cpal::StreamError| warn!(error = %err, "audio input stream error");

    let stream = match sample_format {
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                if is_capturing.load(Ordering::SeqCst) {
                    let mono = stereo_to_mono(data, channels);
                    lock_samples(&buffer).extend_from_slice(&mono);
                }
            },
            on_error,
            None,
        ),
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if is_capturing.load(Ordering::SeqCst) {
                    let i16_data: Vec<i16> = data.iter().map(|&s| (s * 32767.0) as i16).collect();
                    let mono = stereo_to_mono(&i16_data, channels);
                    lock_samples(&buffer).extend_from_slice(&mono);
                }
            },
            on_error,
            None,
        ),
        _ => {
            return Err(RecordingError::StartFailed(
                "Unsupported sample format".into(),
            ))
        }
    }
    .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

    stream
        .play()
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

    Ok((stream, sample_rate))
}

#[async_trait]
impl RecordingHandle for CpalRecordingHandle {
    async fn stop_and_release(&mut self) -> Result<Option<String>, RecordingError> {
        if self.finished {
            return Err(RecordingError::FinalizeFailed(
                "recording already released".into(),
            ));
        }
        self.stop_capture();

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        // kept in the buffer until the clip is on disk so stop can be retried
        let samples = lock_samples(&self.samples).clone();

        if samples.is_empty() {
            warn!("no audio captured");
            self.finished = true;
            return Ok(None);
        }

        let path = self.path.clone();
        let target_rate = self.quality.sample_rate();
        tokio::task::spawn_blocking(move || {
            let resampled = resample_to_rate(&samples, sample_rate, target_rate)?;
            write_wav(&path, &resampled, target_rate)
        })
        .await
        .map_err(|e| RecordingError::FinalizeFailed(format!("Encode task error: {}", e)))??;

        lock_samples(&self.samples).clear();
        self.finished = true;
        info!(path = %self.path.display(), "clip written");
        Ok(Some(self.path.to_string_lossy().into_owned()))
    }

    async fn discard(&mut self) -> Result<(), RecordingError> {
        self.stop_capture();
        lock_samples(&self.samples).clear();
        self.finished = true;
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        let rate = self.device_sample_rate.load(Ordering::SeqCst);
        captured_ms(lock_samples(&self.samples).len(), rate)
    }
}

impl Drop for CpalRecordingHandle {
    fn drop(&mut self) {
        self.stop_capture();
    }
}
