//! Touch-driven crop rectangle editor.
//!
//! The controller owns the crop rectangle (screen space), the transform of
//! the displayed image, and the drag state of the current gesture. A touch
//! down picks what is being dragged, moves edit the rectangle or the image,
//! and touch up converges back to a centered resting state.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::CropConfig;
use crate::consts::EPSILON;
use crate::crop::aspect::{AspectMode, AspectRatio};
use crate::crop::bounds::{self, clamp_to_max, clamp_to_min};
use crate::crop::hit_test::{classify_handle, Corner, Edge, Handle};
use crate::crop::transform::{self, BitmapTransform};
use crate::error::{MediaPickError, Result};
use crate::geometry::{Affine, Animated, Point, RectF};
use crate::io::crop::CropRect;

/// What the current gesture is dragging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingBitmap,
    DraggingCorner(Corner),
    DraggingEdge(Edge),
}

/// Pointer input in view coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Two-finger scale step, relative to the previous step.
    Pinch { factor: f32, focus: Point },
    DoubleTap(Point),
}

/// Bounds snapshot taken at touch-down of a handle drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragBounds {
    pub min: RectF,
    pub max: RectF,
}

pub struct CropController {
    config: CropConfig,
    view: RectF,
    source: Option<RectF>,
    /// Side of the smallest source region the crop may cover, in source pixels.
    min_source_size: f32,
    crop: Animated<RectF>,
    transform: BitmapTransform,
    mode: AspectMode,
    drag: DragState,
    bounds: Option<DragBounds>,
    last_touch: Option<Point>,
}

impl CropController {
    pub fn new(config: CropConfig, view_width: f32, view_height: f32) -> Self {
        let mode = config.aspect_mode().unwrap_or_default();
        Self {
            config,
            view: RectF::from_size(view_width.max(0.0), view_height.max(0.0)),
            source: None,
            min_source_size: 0.0,
            crop: Animated::new(RectF::default()),
            transform: BitmapTransform::default(),
            mode,
            drag: DragState::Idle,
            bounds: None,
            last_touch: None,
        }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn crop_rect(&self) -> RectF {
        self.crop.get()
    }

    pub fn transform(&self) -> Affine {
        self.transform.matrix()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn bounds(&self) -> Option<DragBounds> {
        self.bounds
    }

    pub fn aspect_mode(&self) -> AspectMode {
        self.mode
    }

    pub fn source_size(&self) -> Option<(u32, u32)> {
        self.source
            .map(|s| (s.width().round() as u32, s.height().round() as u32))
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Screen-space extent of the displayed image.
    pub fn image_rect(&self) -> Option<RectF> {
        self.source.map(|s| self.transform.mapped(&s))
    }

    /// Area the crop rectangle rests in: the view inset by the margin.
    pub fn view_area(&self) -> RectF {
        let m = self.config.view_margin;
        if self.view.width() > 2.0 * m && self.view.height() > 2.0 * m {
            RectF::new(
                self.view.left + m,
                self.view.top + m,
                self.view.right - m,
                self.view.bottom - m,
            )
        } else {
            self.view
        }
    }

    fn animation(&self) -> Duration {
        self.config.animation_duration()
    }

    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view = RectF::from_size(width.max(0.0), height.max(0.0));
        self.initialize();
    }

    /// Start editing a new source image of the given pixel size.
    pub fn load_image(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(MediaPickError::InvalidDimensions { width, height });
        }
        let source = RectF::from_size(width as f32, height as f32);
        self.source = Some(source);
        self.min_source_size = width.max(height) as f32 / self.config.max_scale;
        self.drag = DragState::Idle;
        self.bounds = None;
        self.last_touch = None;
        debug!(width, height, min_source = self.min_source_size, "Source image set");
        self.initialize();
        Ok(())
    }

    /// Fit the image into the view and snap straight to the converged state.
    fn initialize(&mut self) {
        let Some(source) = self.source else {
            return;
        };
        let area = self.view_area();
        if !area.is_valid() {
            return;
        }
        let Some(fit) = transform::contain_fit(&source, &area) else {
            return;
        };
        self.transform.reset(fit);
        self.crop.set(fit.map_rect(&source));
        self.converge(false);
    }

    pub fn set_aspect_mode(&mut self, mode: AspectMode) {
        self.mode = mode;
        debug!(aspect = %mode, "Aspect mode changed");
        if self.source.is_some() {
            self.converge(true);
        }
    }

    /// Recompute the centered target rectangle for the current aspect and
    /// move both the crop rectangle and the image transform onto it.
    fn converge(&mut self, animate: bool) {
        let Some(source) = self.source else {
            return;
        };
        let area = self.view_area();
        if !area.is_valid() {
            return;
        }

        let ratio = match self.mode {
            AspectMode::Locked(r) => r.value(),
            AspectMode::Free => {
                let current = self.crop.resting();
                if current.is_valid() {
                    current.width() / current.height()
                } else {
                    source.width() / source.height()
                }
            }
        };
        if !(ratio.is_finite() && ratio > 0.0) {
            warn!(ratio, "Skipping convergence for degenerate ratio");
            return;
        }

        let (w, h) = if ratio > area.width() / area.height() {
            (area.width(), area.width() / ratio)
        } else {
            (area.height() * ratio, area.height())
        };
        let target = RectF::from_center_size(self.view.center(), w, h);
        let Some(matrix) = transform::cover_fit(&source, &target) else {
            return;
        };

        if animate {
            self.crop.animate_to(target, self.animation());
            self.transform.animate_to(matrix, self.animation());
        } else {
            self.crop.set(target);
            self.transform.reset(matrix);
        }
    }

    pub fn handle(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Down(p) => self.touch_down(p),
            TouchEvent::Move(p) => self.touch_move(p),
            TouchEvent::Up => self.touch_up(),
            TouchEvent::Pinch { factor, focus } => self.pinch(factor, focus),
            TouchEvent::DoubleTap(p) => self.double_tap(p),
        }
    }

    pub fn touch_down(&mut self, p: Point) {
        let Some(source) = self.source else {
            debug!("Touch ignored: no image loaded");
            return;
        };

        // the new gesture takes over from any running convergence
        self.finish_animations();

        let crop = self.crop.get();
        self.drag = match classify_handle(&crop, p, self.config.touch_threshold) {
            Some(Handle::Corner(c)) => DragState::DraggingCorner(c),
            Some(Handle::Edge(e)) => DragState::DraggingEdge(e),
            None => DragState::DraggingBitmap,
        };
        self.last_touch = Some(p);

        let handle = match self.drag {
            DragState::DraggingCorner(c) => Handle::Corner(c),
            DragState::DraggingEdge(e) => Handle::Edge(e),
            DragState::DraggingBitmap | DragState::Idle => {
                debug!(x = p.x, y = p.y, "Dragging image");
                return;
            }
        };

        let mapped_min = self.min_source_size * self.transform.matrix().scale_x();
        let min_size = self.config.min_rect_length.max(mapped_min);
        let border = self
            .transform
            .mapped(&source)
            .intersection(&self.view)
            .unwrap_or(crop);

        let snapshot = DragBounds {
            min: bounds::min_rect(&crop, handle, self.mode, min_size),
            max: bounds::max_rect(&crop, handle, self.mode, &border),
        };
        debug!(?handle, ?snapshot, min_size, "Handle drag started");
        self.bounds = Some(snapshot);
    }

    pub fn touch_move(&mut self, p: Point) {
        match self.drag {
            DragState::Idle => {}
            DragState::DraggingBitmap => {
                if let Some(last) = self.last_touch {
                    self.transform.translate(p.x - last.x, p.y - last.y);
                }
                self.last_touch = Some(p);
            }
            DragState::DraggingCorner(corner) => {
                let before = self.crop.get();
                let edited = match self.mode {
                    AspectMode::Free => Some(move_corner_free(&before, corner, p)),
                    AspectMode::Locked(r) => move_corner_locked(&before, corner, p, r),
                };
                self.apply_edit(before, edited);
            }
            DragState::DraggingEdge(edge) => {
                let before = self.crop.get();
                let edited = match self.mode {
                    AspectMode::Free => Some(move_edge_free(&before, edge, p)),
                    AspectMode::Locked(r) => Some(move_edge_locked(&before, edge, p, r)),
                };
                self.apply_edit(before, edited);
            }
        }
    }

    /// Clamp an edited rectangle into the gesture's bounds, keeping the
    /// previous rectangle when the edit was rejected or came out degenerate.
    fn apply_edit(&mut self, before: RectF, edited: Option<RectF>) {
        let Some(mut rect) = edited else {
            return;
        };
        if let Some(b) = self.bounds {
            clamp_to_max(&mut rect, &b.max);
            clamp_to_min(&mut rect, &b.min);
        }
        if rect.is_valid() {
            self.crop.set(rect);
        } else {
            warn!(?rect, "Discarding degenerate crop rectangle");
            self.crop.set(before);
        }
    }

    pub fn touch_up(&mut self) {
        let state = std::mem::take(&mut self.drag);
        self.bounds = None;
        self.last_touch = None;

        match state {
            DragState::DraggingCorner(_) | DragState::DraggingEdge(_) => self.recenter(),
            DragState::DraggingBitmap => self.settle(),
            DragState::Idle => {}
        }
    }

    /// Scale the edited crop rectangle to best fit the view area, centered,
    /// and move the image along so the same content stays selected.
    fn recenter(&mut self) {
        let crop = self.crop.get();
        if !crop.is_valid() {
            return;
        }
        let area = self.view_area();
        if !area.is_valid() {
            return;
        }
        let scale = (area.width() / crop.width()).min(area.height() / crop.height());
        let target = RectF::from_center_size(
            area.center(),
            crop.width() * scale,
            crop.height() * scale,
        );

        let image_scale = target.width() / crop.width();
        let matrix = self
            .transform
            .resting()
            .then(&Affine::scale_about(image_scale, crop.center()))
            .then(&Affine::translation(
                target.center_x() - crop.center_x(),
                target.center_y() - crop.center_y(),
            ));

        debug!(?target, image_scale, "Recentering crop rectangle");
        self.transform.animate_to(matrix, self.animation());
        self.crop.animate_to(target, self.animation());
    }

    /// Restore full image coverage of the crop rectangle after a pan.
    pub fn settle(&mut self) {
        let Some(source) = self.source else {
            return;
        };
        let resting = self.transform.resting();
        let settled = transform::settle(&resting, &source, &self.crop.resting());
        if settled != resting {
            debug!("Settling dragged image");
            self.transform.animate_to(settled, self.animation());
        }
    }

    pub fn pinch(&mut self, factor: f32, focus: Point) {
        if self.drag != DragState::DraggingBitmap || self.source.is_none() {
            return;
        }
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let crop = self.crop.get();
        if self
            .transform
            .would_exceed_zoom(factor, &crop, self.min_source_size)
        {
            debug!(factor, "Pinch rejected at zoom ceiling");
            return;
        }
        self.transform.scale_about(factor, focus);
    }

    pub fn double_tap(&mut self, p: Point) {
        if !matches!(self.drag, DragState::Idle | DragState::DraggingBitmap) {
            return;
        }
        let Some(source) = self.source else {
            return;
        };
        let factor = self.config.double_tap_scale_factor;
        let crop = self.crop.get();

        if self
            .transform
            .would_exceed_zoom(factor, &crop, self.min_source_size)
        {
            if let Some(fit) = transform::cover_fit(&source, &crop) {
                debug!("Double tap at zoom ceiling, fitting image to crop");
                self.transform.animate_to(fit, self.animation());
            }
            return;
        }
        self.transform
            .animate_scale_to_point(factor, p, self.animation());
    }

    /// Step running animations. Returns true while anything is still moving.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let crop = self.crop.advance(dt);
        let matrix = self.transform.advance(dt);
        crop || matrix
    }

    pub fn is_animating(&self) -> bool {
        self.crop.is_animating() || self.transform.is_animating()
    }

    pub fn finish_animations(&mut self) {
        self.crop.finish();
        self.transform.finish();
    }

    /// Crop rectangle mapped into source pixel space.
    pub fn source_crop_rect(&self) -> Option<RectF> {
        self.source?;
        self.transform.to_source(&self.crop.get())
    }

    /// Integer pixel region of the source selected by the crop rectangle.
    pub fn pixel_region(&self) -> Result<CropRect> {
        let source = self.source.ok_or(MediaPickError::NoImageLoaded)?;
        let mapped = self
            .source_crop_rect()
            .ok_or_else(|| MediaPickError::InvalidCrop("Image transform is not invertible".into()))?;
        Ok(crate::crop::extract::pixel_region(
            &mapped,
            source.width().round() as u32,
            source.height().round() as u32,
        ))
    }

    /// Rule-of-thirds guide lines inside the crop rectangle.
    pub fn grid_lines(&self) -> [(Point, Point); 4] {
        let r = self.crop.get();
        let x1 = r.left + r.width() / 3.0;
        let x2 = r.left + r.width() * 2.0 / 3.0;
        let y1 = r.top + r.height() / 3.0;
        let y2 = r.top + r.height() * 2.0 / 3.0;
        [
            (Point::new(x1, r.top), Point::new(x1, r.bottom)),
            (Point::new(x2, r.top), Point::new(x2, r.bottom)),
            (Point::new(r.left, y1), Point::new(r.right, y1)),
            (Point::new(r.left, y2), Point::new(r.right, y2)),
        ]
    }
}

fn move_corner_free(rect: &RectF, corner: Corner, p: Point) -> RectF {
    let mut r = *rect;
    match corner {
        Corner::TopLeft => {
            r.left = p.x;
            r.top = p.y;
        }
        Corner::TopRight => {
            r.right = p.x;
            r.top = p.y;
        }
        Corner::BottomRight => {
            r.right = p.x;
            r.bottom = p.y;
        }
        Corner::BottomLeft => {
            r.left = p.x;
            r.bottom = p.y;
        }
    }
    r
}

/// Resize about the opposite corner so that the diagonal ends at the touch.
/// Returns `None` when the touch is on the anchor side of the center.
fn move_corner_locked(rect: &RectF, corner: Corner, p: Point, ratio: AspectRatio) -> Option<RectF> {
    let center = rect.center();
    let handle = corner.point(rect);
    let anchor = corner.opposite().point(rect);

    let dir_x = (handle.x - center.x).signum();
    let dir_y = (handle.y - center.y).signum();
    if (p.x - center.x) * dir_x <= 0.0 || (p.y - center.y) * dir_y <= 0.0 {
        return None;
    }

    let diagonal = p.distance(anchor);
    let unit = ratio.width_ratio.hypot(ratio.height_ratio);
    if unit <= EPSILON {
        return None;
    }
    let w = diagonal * ratio.width_ratio / unit;
    let h = diagonal * ratio.height_ratio / unit;

    let (left, right) = if dir_x > 0.0 {
        (anchor.x, anchor.x + w)
    } else {
        (anchor.x - w, anchor.x)
    };
    let (top, bottom) = if dir_y > 0.0 {
        (anchor.y, anchor.y + h)
    } else {
        (anchor.y - h, anchor.y)
    };
    Some(RectF::new(left, top, right, bottom))
}

fn move_edge_free(rect: &RectF, edge: Edge, p: Point) -> RectF {
    let mut r = *rect;
    match edge {
        Edge::Left => r.left = p.x,
        Edge::Top => r.top = p.y,
        Edge::Right => r.right = p.x,
        Edge::Bottom => r.bottom = p.y,
    }
    r
}

/// Move the dragged edge to the touch and resize the perpendicular axis
/// symmetrically about the center to keep `ratio`.
fn move_edge_locked(rect: &RectF, edge: Edge, p: Point, ratio: AspectRatio) -> RectF {
    let mut r = *rect;
    match edge {
        Edge::Left | Edge::Right => {
            if edge == Edge::Left {
                r.left = p.x;
            } else {
                r.right = p.x;
            }
            let h = ratio.height_for(r.width());
            let cy = rect.center_y();
            r.top = cy - h / 2.0;
            r.bottom = cy + h / 2.0;
        }
        Edge::Top | Edge::Bottom => {
            if edge == Edge::Top {
                r.top = p.y;
            } else {
                r.bottom = p.y;
            }
            let w = ratio.width_for(r.height());
            let cx = rect.center_x();
            r.left = cx - w / 2.0;
            r.right = cx + w / 2.0;
        }
    }
    r
}
