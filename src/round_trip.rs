//! The auto-correct cycle: encode the canvas, send it to the service,
//! decode the answer and put it on the canvas.
//!
//! The canvas is only touched once the answer has been decoded, so any
//! failure leaves it as it was.

use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;

use crate::codec::{self, DecodePolicy, DecodedStrokes};
use crate::document::DrawingSurface;
use crate::error::RoundTripError;
use crate::state::{InFlightGuard, InFlightToken};
use crate::stroke::{Stroke, StrokeStyle};
use crate::transport::StrokeService;

pub type RoundTripResult = Result<DecodedStrokes, RoundTripError>;

/// Encode, exchange, decode. Does not touch any surface.
pub fn round_trip(
    strokes: &[Stroke],
    service: &dyn StrokeService,
    style: &StrokeStyle,
    policy: DecodePolicy,
) -> RoundTripResult {
    let csv = codec::encode_strokes(strokes)?;
    let answer = service.exchange(&csv)?;
    Ok(codec::decode_strokes(&answer, style, policy)?)
}

/// Runs a whole cycle on the calling thread and replaces the surface content.
///
/// Returns the number of strokes loaded.
pub fn run_blocking(
    surface: &mut dyn DrawingSurface,
    guard: &InFlightGuard,
    service: &dyn StrokeService,
    style: &StrokeStyle,
    policy: DecodePolicy,
) -> Result<usize, RoundTripError> {
    let _token = guard.try_acquire().ok_or(RoundTripError::Busy)?;
    let decoded = round_trip(&surface.export_strokes(), service, style, policy)?;
    Ok(apply(decoded, surface))
}

/// Clear-then-load of a decoded answer
pub fn apply(decoded: DecodedStrokes, surface: &mut dyn DrawingSurface) -> usize {
    if decoded.skipped_rows() > 0 {
        log::warn!("{} rows of the answer were skipped", decoded.skipped_rows());
    }
    let strokes = decoded.into_dense();
    let count = strokes.len();
    surface.replace_strokes(strokes);
    count
}

/// A cycle running on a worker thread
pub struct RoundTripJob {
    receiver: oneshot::Receiver<RoundTripResult>,
    // Held until the result has been taken
    _token: InFlightToken,
}

impl RoundTripJob {
    /// Starts a cycle for `strokes`.
    ///
    /// Fails without spawning if a cycle is already running or there is
    /// nothing to send. `on_done` runs on the worker once the result is ready.
    pub fn spawn(
        guard: &InFlightGuard,
        strokes: &[Stroke],
        service: Arc<dyn StrokeService>,
        style: StrokeStyle,
        policy: DecodePolicy,
        on_done: impl FnOnce() + Send + 'static,
    ) -> Result<Self, RoundTripError> {
        let token = guard.try_acquire().ok_or(RoundTripError::Busy)?;
        let csv = codec::encode_strokes(strokes)?;

        let (sender, receiver) = oneshot::channel();
        thread::Builder::new()
            .name("auto-correct".to_owned())
            .spawn(move || {
                let result = service
                    .exchange(&csv)
                    .map_err(RoundTripError::from)
                    .and_then(|answer| {
                        codec::decode_strokes(&answer, &style, policy).map_err(RoundTripError::from)
                    });
                if sender.send(result).is_err() {
                    log::debug!("Auto-correct result dropped, job was abandoned");
                }
                on_done();
            })
            .map_err(|_| RoundTripError::WorkerGone)?;

        Ok(Self {
            receiver,
            _token: token,
        })
    }

    /// `None` while the worker is still running
    pub fn poll(&mut self) -> Option<RoundTripResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(RoundTripError::WorkerGone)),
        }
    }

    /// Blocks until the worker answers
    pub fn wait(self) -> RoundTripResult {
        futures::executor::block_on(self.receiver).unwrap_or(Err(RoundTripError::WorkerGone))
    }
}
