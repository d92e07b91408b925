//! Animated spiderweb background on the hero canvas.
//!
//! A single frame loop advances a phase value and repaints concentric
//! wobbling rings plus radial strands over a radial gradient. The loop is an
//! explicit start/stop object so a bounded number of steps can be driven
//! deterministically.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::dom;

const STRANDS: usize = 14;
const RINGS: usize = 7;
const PHASE_STEP: f64 = 0.003;
const MAX_RADIUS_RATIO: f64 = 0.75;
const HUB_RADIUS_RATIO: f64 = 0.09;
const RING_WOBBLE: f64 = 0.02;
const STRAND_SWAY: f64 = 0.1;
const RING_LINE_WIDTH: f64 = 0.7;
const STRAND_LINE_WIDTH: f64 = 0.6;
const RING_STROKE: &str = "rgba(148, 163, 184, 0.34)";
const STRAND_STROKE: &str = "rgba(55, 65, 81, 0.45)";
const GRADIENT_INNER: &str = "rgba(15, 23, 42, 0.95)";
const GRADIENT_OUTER: &str = "rgba(2, 6, 23, 1)";

/// Canvas pixel dimensions for a CSS-pixel viewport at the given device
/// pixel ratio.
fn pixel_size(viewport: (f64, f64), dpr: f64) -> (u32, u32) {
    ((viewport.0 * dpr) as u32, (viewport.1 * dpr) as u32)
}

fn ring_radius(max_radius: f64, ring: usize) -> f64 {
    max_radius * ring as f64 / RINGS as f64
}

fn ring_wobble(phase: f64, ring: usize, radius: f64) -> f64 {
    (phase * 2.0 + ring as f64).sin() * radius * RING_WOBBLE
}

/// Closed polygon vertices of one wobbling ring, first vertex repeated at
/// the end.
fn ring_points(phase: f64, max_radius: f64, ring: usize) -> Vec<(f64, f64)> {
    let radius = ring_radius(max_radius, ring);
    let wobbled = radius + ring_wobble(phase, ring, radius);
    (0..=STRANDS)
        .map(|vertex| {
            let angle = vertex as f64 / STRANDS as f64 * TAU;
            (angle.cos() * wobbled, angle.sin() * wobbled)
        })
        .collect()
}

/// Inner and outer endpoints of one radial strand, swaying around its rest
/// angle.
fn strand_segment(phase: f64, max_radius: f64, strand: usize) -> ((f64, f64), (f64, f64)) {
    let angle = strand as f64 / STRANDS as f64 * TAU + (phase + strand as f64).sin() * STRAND_SWAY;
    let (sin, cos) = angle.sin_cos();
    let hub = max_radius * HUB_RADIUS_RATIO;
    ((cos * hub, sin * hub), (cos * max_radius, sin * max_radius))
}

struct CanvasState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    // Center and outer radius stay as captured at setup; only the pixel
    // dimensions and scale transform respond to resize.
    center: (f64, f64),
    max_radius: f64,
    size: Cell<(f64, f64)>,
    phase: Cell<f64>,
    running: Cell<bool>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl CanvasState {
    fn resize(&self) {
        let viewport = dom::viewport_size();
        let dpr = dom::device_pixel_ratio();
        let (width, height) = pixel_size(viewport, dpr);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let _ = self.ctx.scale(dpr, dpr);
        self.size.set((width as f64, height as f64));
    }

    /// Advance the phase and repaint one frame.
    fn step(&self) {
        self.phase.set(self.phase.get() + PHASE_STEP);
        let phase = self.phase.get();
        let (width, height) = self.size.get();
        let (cx, cy) = self.center;
        let ctx = &self.ctx;

        ctx.clear_rect(0.0, 0.0, width, height);
        if let Ok(gradient) =
            ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, self.max_radius * 1.1)
        {
            let _ = gradient.add_color_stop(0.0, GRADIENT_INNER);
            let _ = gradient.add_color_stop(1.0, GRADIENT_OUTER);
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(0.0, 0.0, width, height);
        }

        ctx.save();
        let _ = ctx.translate(cx, cy);

        ctx.set_line_width(RING_LINE_WIDTH);
        ctx.set_stroke_style_str(RING_STROKE);
        for ring in 1..=RINGS {
            ctx.begin_path();
            for (index, (x, y)) in ring_points(phase, self.max_radius, ring)
                .into_iter()
                .enumerate()
            {
                if index == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }

        ctx.set_line_width(STRAND_LINE_WIDTH);
        ctx.set_stroke_style_str(STRAND_STROKE);
        for strand in 0..STRANDS {
            let ((x0, y0), (x1, y1)) = strand_segment(phase, self.max_radius, strand);
            ctx.begin_path();
            ctx.move_to(x0, y0);
            ctx.line_to(x1, y1);
            ctx.stroke();
        }

        ctx.restore();
    }
}

/// The animated background widget. Starts its frame loop on mount and keeps
/// painting until dropped or stopped.
pub struct WebCanvas {
    state: Rc<CanvasState>,
    _resize: EventListener,
}

impl WebCanvas {
    pub fn mount(document: &Document) -> Option<Self> {
        let canvas: HtmlCanvasElement = document.get_element_by_id("web-canvas")?.dyn_into().ok()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;

        let viewport = dom::viewport_size();
        let dpr = dom::device_pixel_ratio();
        let (width, height) = pixel_size(viewport, dpr);
        canvas.set_width(width);
        canvas.set_height(height);
        let _ = ctx.scale(dpr, dpr);

        let state = Rc::new(CanvasState {
            center: (viewport.0 / 2.0, viewport.1 / 3.0),
            max_radius: viewport.0.min(viewport.1) * MAX_RADIUS_RATIO,
            size: Cell::new((width as f64, height as f64)),
            phase: Cell::new(0.0),
            running: Cell::new(false),
            frame: RefCell::new(None),
            canvas,
            ctx,
        });

        let window = web_sys::window()?;
        let resize = EventListener::new(&window, "resize", {
            let state = Rc::clone(&state);
            move |_| state.resize()
        });

        let widget = Self {
            state,
            _resize: resize,
        };
        widget.start();
        Some(widget)
    }

    pub fn start(&self) {
        if self.state.running.replace(true) {
            return;
        }
        Self::schedule(&self.state);
    }

    pub fn stop(&self) {
        self.state.running.set(false);
        self.state.frame.borrow_mut().take();
    }

    fn schedule(state: &Rc<CanvasState>) {
        let next = Rc::clone(state);
        let handle = request_animation_frame(move |_| {
            next.frame.borrow_mut().take();
            if !next.running.get() {
                return;
            }
            next.step();
            Self::schedule(&next);
        });
        *state.frame.borrow_mut() = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_scales_by_device_pixel_ratio() {
        assert_eq!(pixel_size((1920.0, 1080.0), 2.0), (3840, 2160));
        assert_eq!(pixel_size((390.0, 844.0), 3.0), (1170, 2532));
    }

    #[test]
    fn ring_radii_are_evenly_spaced_up_to_max() {
        let max_radius = 700.0;
        let spacing = ring_radius(max_radius, 1);
        for ring in 1..=RINGS {
            let radius = ring_radius(max_radius, ring);
            assert!((radius - spacing * ring as f64).abs() < 1e-9);
        }
        assert!((ring_radius(max_radius, RINGS) - max_radius).abs() < 1e-9);
    }

    #[test]
    fn wobble_stays_within_two_percent_of_radius() {
        let max_radius = 700.0;
        for ring in 1..=RINGS {
            let radius = ring_radius(max_radius, ring);
            for step in 0..200 {
                let phase = step as f64 * 0.1;
                assert!(ring_wobble(phase, ring, radius).abs() <= radius * RING_WOBBLE + 1e-9);
            }
        }
    }

    #[test]
    fn ring_polygon_closes_on_itself() {
        let points = ring_points(0.42, 700.0, 3);
        assert_eq!(points.len(), STRANDS + 1);
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!((first.0 - last.0).abs() < 1e-9);
        assert!((first.1 - last.1).abs() < 1e-9);
    }

    #[test]
    fn strands_run_from_hub_to_outer_radius() {
        let max_radius = 700.0;
        for strand in 0..STRANDS {
            let ((x0, y0), (x1, y1)) = strand_segment(1.7, max_radius, strand);
            let inner = (x0 * x0 + y0 * y0).sqrt();
            let outer = (x1 * x1 + y1 * y1).sqrt();
            assert!((inner - max_radius * HUB_RADIUS_RATIO).abs() < 1e-9);
            assert!((outer - max_radius).abs() < 1e-9);
        }
    }
}
