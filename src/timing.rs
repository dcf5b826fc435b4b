//! Frame loops and timers that drive effects.
//!
//! All loops are blocking: the calling thread sleeps between frames and is
//! occupied for the whole run. A [`CancelToken`] is checked at every frame
//! boundary; a sleep in progress is never interrupted.

use core::cell::Cell;
use std::sync::Arc;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

use crate::{Result, math8::progress8};

/// Default target frame rate (50 FPS).
pub const DEFAULT_FPS: u32 = 50;

/// Default delay between frames based on target FPS.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// What a frame callback wants the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Sleep the loop's frame delay, then run the next frame.
    Continue,
    /// Sleep this long instead of the loop's frame delay.
    Delay(Duration),
    /// Leave the loop without sleeping.
    Stop,
}

/// How a loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Completed,
    Cancelled,
    Stopped,
}

/// Shared flag asking running loops to stop at their next frame boundary.
///
/// Clones observe the same flag. The token is `Send + Sync`, so it can be
/// raised from another thread or a signal handler.
#[derive(Clone)]
pub struct CancelToken {
    flag: Arc<Mutex<Cell<bool>>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self { flag: Arc::new(Mutex::new(Cell::new(false))) }
    }
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        critical_section::with(|cs| self.flag.borrow(cs).set(true));
    }

    pub fn is_cancelled(&self) -> bool {
        critical_section::with(|cs| self.flag.borrow(cs).get())
    }

    /// Clear a previous request so the token can be reused
    pub fn reset(&self) {
        critical_section::with(|cs| self.flag.borrow(cs).set(false));
    }
}

impl core::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Block the current thread for `duration`
pub fn sleep(duration: Duration) {
    if duration.as_ticks() == 0 {
        return;
    }
    std::thread::sleep(core::time::Duration::from_micros(duration.as_micros()));
}

/// Block the current thread for `ms` milliseconds
pub fn wait(ms: u64) {
    sleep(Duration::from_millis(ms));
}

/// Number of frames needed to cover `duration_ms` at `fps`, at least one
pub fn frames_for(duration_ms: u64, fps: u32) -> u32 {
    let frames = duration_ms * u64::from(fps) / 1000;
    u32::try_from(frames).unwrap_or(u32::MAX).max(1)
}

/// Delay between frames for a target frame rate
pub fn frame_delay_for_fps(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}

/// Number of whole `cycle_ms` cycles in `duration_ms`, at least one
pub fn iterations_for(duration_ms: u64, cycle_ms: u64) -> u32 {
    if cycle_ms == 0 {
        return 1;
    }
    u32::try_from(duration_ms / cycle_ms)
        .unwrap_or(u32::MAX)
        .max(1)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(elapsed: Duration, total: Duration) -> f32 {
    if total.as_ticks() == 0 {
        return 1.0;
    }
    (elapsed.as_micros() as f32 / total.as_micros() as f32).min(1.0)
}

/// Run `frame` until `duration_ms` of wall-clock time has elapsed.
///
/// The callback receives the elapsed milliseconds and the progress in
/// 0.0-1.0. Once the duration is reached it is called one last time with
/// progress exactly 1.0, so every completed run ends on its final frame.
pub fn run_for_duration<F>(
    duration_ms: u64,
    frame_delay: Duration,
    cancel: &CancelToken,
    mut frame: F,
) -> Result<LoopExit>
where
    F: FnMut(u64, f32) -> Result<FrameControl>,
{
    let duration = Duration::from_millis(duration_ms);
    let start = Instant::now();
    let mut frames: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            tracing::trace!(frames, "duration loop cancelled");
            return Ok(LoopExit::Cancelled);
        }

        let elapsed = start.elapsed();
        if elapsed >= duration {
            frame(elapsed.as_millis(), 1.0)?;
            tracing::trace!(frames = frames + 1, "duration loop completed");
            return Ok(LoopExit::Completed);
        }

        let control = frame(elapsed.as_millis(), ratio(elapsed, duration))?;
        frames += 1;
        match control {
            FrameControl::Continue => sleep(frame_delay),
            FrameControl::Delay(delay) => sleep(delay),
            FrameControl::Stop => return Ok(LoopExit::Stopped),
        }
    }
}

/// Run `frame` exactly `frame_count` times.
///
/// Progress is `frame / (frame_count - 1)`, so the last frame sees 1.0.
/// The loop sleeps between frames but not after the last one.
#[allow(clippy::cast_precision_loss)]
pub fn run_for_frames<F>(
    frame_count: u32,
    frame_delay: Duration,
    cancel: &CancelToken,
    mut frame: F,
) -> Result<LoopExit>
where
    F: FnMut(u32, f32) -> Result<FrameControl>,
{
    let last = frame_count.saturating_sub(1).max(1) as f32;

    for index in 0..frame_count {
        if cancel.is_cancelled() {
            tracing::trace!(index, "frame loop cancelled");
            return Ok(LoopExit::Cancelled);
        }

        let control = frame(index, index as f32 / last)?;
        let delay = match control {
            FrameControl::Continue => frame_delay,
            FrameControl::Delay(delay) => delay,
            FrameControl::Stop => return Ok(LoopExit::Stopped),
        };
        if index + 1 < frame_count {
            sleep(delay);
        }
    }

    Ok(LoopExit::Completed)
}

/// Manual timer for effects with hand-rolled loops.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
    duration: Duration,
}

impl Timer {
    /// Start a timer for `duration_ms`
    pub fn new(duration_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            duration: Duration::from_millis(duration_ms),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis()
    }

    /// Elapsed fraction of the duration, clamped to 1.0
    pub fn progress(&self) -> f32 {
        ratio(self.elapsed(), self.duration)
    }

    /// Elapsed fraction on the 0-255 scale
    pub fn progress8(&self) -> u8 {
        progress8(self.elapsed(), self.duration)
    }

    pub fn remaining(&self) -> Duration {
        self.duration
            .checked_sub(self.elapsed())
            .unwrap_or(Duration::from_ticks(0))
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed() >= self.duration
    }

    /// Restart from now
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_for() {
        assert_eq!(frames_for(1000, 50), 50);
        assert_eq!(frames_for(10, 50), 1);
        assert_eq!(frames_for(0, 50), 1);
    }

    #[test]
    fn test_frame_delay_for_fps() {
        assert_eq!(frame_delay_for_fps(50), Duration::from_millis(20));
        assert_eq!(frame_delay_for_fps(0), Duration::from_secs(1));
    }

    #[test]
    fn test_iterations_for() {
        assert_eq!(iterations_for(1000, 300), 3);
        assert_eq!(iterations_for(100, 300), 1);
        assert_eq!(iterations_for(100, 0), 1);
    }
}
