use super::curve::Curve;
use super::geometry::GeometryCache;
use super::shape::ShapeFunction;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Stable identity of a pooled curve (its pool index). Identity survives
/// `reset`; configured parameters do not.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CurveId(pub usize);

/// Renderer boundary: a container that drawable tubes are attached to and
/// detached from. The render layer implements this over its draw list; tests
/// implement it with a recording mock.
pub trait CurveScene {
    fn attach(&mut self, id: CurveId);
    fn detach(&mut self, id: CurveId);
}

/// Draw-order container owned by the scene driver. Insertion order is
/// activation order, which is also draw order.
#[derive(Default)]
pub struct DrawList {
    order: SmallVec<[CurveId; 32]>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = CurveId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl CurveScene for DrawList {
    fn attach(&mut self, id: CurveId) {
        self.order.push(id);
    }

    fn detach(&mut self, id: CurveId) {
        self.order.retain(|x| *x != id);
    }
}

/// Object pool + active-list controller for one family of tubes.
///
/// Every manager is bound to a single shape function and tessellation at
/// construction; all of its curves share one shader pipeline and one cached
/// mesh. The pool never shrinks: pooled-but-inactive curves keep their
/// allocations so reactivation never churns rendering resources.
pub struct CurveManager {
    curves: Vec<Curve>,
    active_count: usize,
    shape: ShapeFunction,
    lon_segments: u32,
    rad_segments: u32,
    cache: Rc<RefCell<GeometryCache>>,
}

impl CurveManager {
    pub fn new(
        shape: ShapeFunction,
        lon_segments: u32,
        rad_segments: u32,
        cache: Rc<RefCell<GeometryCache>>,
    ) -> Self {
        Self {
            curves: Vec::new(),
            active_count: 0,
            shape,
            lon_segments,
            rad_segments,
            cache,
        }
    }

    /// Revive a pooled curve or allocate a fresh one, attach it to the scene,
    /// and hand it to the caller for configuration. Cannot fail; the pool
    /// grows on demand.
    pub fn acquire(&mut self, scene: &mut dyn CurveScene) -> &mut Curve {
        let index = self.active_count;
        self.active_count += 1;
        if index == self.curves.len() {
            self.curves.push(Curve::new());
        }
        scene.attach(CurveId(index));
        &mut self.curves[index]
    }

    /// Detach every active curve and return it to the pool. Allocations are
    /// retained.
    pub fn reset(&mut self, scene: &mut dyn CurveScene) {
        for index in 0..self.active_count {
            scene.detach(CurveId(index));
        }
        self.active_count = 0;
    }

    /// Drive every active curve's per-frame update, strictly in activation
    /// order. Parameter values are never read or validated here.
    pub fn update(&mut self, time: f32) {
        let mut cache = self.cache.borrow_mut();
        for curve in &mut self.curves[..self.active_count] {
            curve.update(time, self.lon_segments, self.rad_segments, &mut cache);
        }
    }

    pub fn curve(&self, id: CurveId) -> &Curve {
        &self.curves[id.0]
    }

    pub fn active(&self) -> &[Curve] {
        &self.curves[..self.active_count]
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn pooled_count(&self) -> usize {
        self.curves.len()
    }

    pub fn shape(&self) -> ShapeFunction {
        self.shape
    }

    pub fn tessellation(&self) -> (u32, u32) {
        (self.lon_segments, self.rad_segments)
    }
}
