//! Windowed event loop around the GPU state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::gpu::GpuState;
use crate::types::RendererConfig;

/// Paces redraw requests to an optional frame interval.
///
/// With no interval every `AboutToWait` requests a redraw immediately,
/// which lands at the display rate under Fifo presentation.
struct FramePacer {
    interval: Option<Duration>,
    next_frame: Instant,
}

impl FramePacer {
    fn new(target_fps: Option<f32>) -> Self {
        Self {
            interval: target_fps.map(|fps| Duration::from_secs_f32(1.0 / fps)),
            next_frame: Instant::now(),
        }
    }

    fn ready(&self, now: Instant) -> bool {
        self.interval.is_none() || now >= self.next_frame
    }

    fn deadline(&self) -> Option<Instant> {
        self.interval.map(|_| self.next_frame)
    }

    fn mark_presented(&mut self, now: Instant) {
        if let Some(interval) = self.interval {
            // Anchor on the previous deadline so a slow frame does not push
            // every later frame back, but never schedule into the past.
            self.next_frame = (self.next_frame + interval).max(now);
        }
    }
}

pub(crate) fn run_window(config: RendererConfig) -> Result<()> {
    let event_loop = EventLoopBuilder::new()
        .build()
        .context("failed to create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("terraview")
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false)
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let mut state = GpuState::new(window.as_ref(), window.inner_size())?;
    let mut pacer = FramePacer::new(config.target_fps);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => elwt.exit(),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => pacer.mark_presented(Instant::now()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("surface ran out of memory, shutting down");
                    elwt.exit();
                }
                Err(err) => {
                    tracing::warn!(%err, "skipping frame after surface error");
                }
            },
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if pacer.ready(now) {
                window.request_redraw();
                elwt.set_control_flow(ControlFlow::Poll);
            } else if let Some(deadline) = pacer.deadline() {
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
        _ => {}
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaced_pacer_is_always_ready() {
        let pacer = FramePacer::new(None);
        assert!(pacer.ready(Instant::now()));
        assert!(pacer.deadline().is_none());
    }

    #[test]
    fn paced_pacer_waits_out_the_interval() {
        let mut pacer = FramePacer::new(Some(10.0));
        let start = Instant::now();
        pacer.next_frame = start;
        assert!(pacer.ready(start));

        pacer.mark_presented(start);
        assert!(!pacer.ready(start + Duration::from_millis(50)));
        assert!(pacer.ready(start + Duration::from_millis(100)));
    }

    #[test]
    fn slow_frame_does_not_accumulate_debt() {
        let mut pacer = FramePacer::new(Some(10.0));
        let start = Instant::now();
        pacer.next_frame = start;

        // Present three intervals late; the next deadline anchors on now.
        let late = start + Duration::from_millis(300);
        pacer.mark_presented(late);
        assert!(pacer.next_frame >= late);
    }
}
