use fnv::FnvHashMap;
use std::rc::Rc;

/// Unit tube mesh shared by every curve drawn at the same tessellation.
///
/// Vertices are rings of `rad_segments` unit-circle samples stacked along
/// `z ∈ [0, 1]` (`lon_segments + 1` rings), plus one center apex at each end.
/// The vertex shader treats `z` as the curve parameter `t` and `x`/`y` as the
/// billboard cross-section offset, so the mesh itself never changes shape.
///
/// Indices are `u32`: wide tessellations legitimately exceed the u16 vertex
/// range.
pub struct TubeGeometry {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub lon_segments: u32,
    pub rad_segments: u32,
}

impl TubeGeometry {
    pub fn build(lon_segments: u32, rad_segments: u32) -> Self {
        let ring: Vec<(f32, f32)> = (0..rad_segments)
            .map(|i| {
                let th = 2.0 * std::f32::consts::PI * i as f32 / rad_segments as f32;
                (th.cos(), th.sin())
            })
            .collect();

        let vertex_count = (rad_segments * (lon_segments + 1) + 2) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        for i in 0..=lon_segments {
            let z = i as f32 / lon_segments as f32;
            for &(cos, sin) in &ring {
                positions.push([cos, sin, z]);
            }
        }
        let bottom = positions.len() as u32;
        positions.push([0.0, 0.0, 0.0]);
        let top = positions.len() as u32;
        positions.push([0.0, 0.0, 1.0]);

        let mut indices = Vec::with_capacity((6 * lon_segments * rad_segments + 6 * rad_segments) as usize);
        for i in 0..lon_segments {
            let idxa = i * rad_segments;
            let idxb = (i + 1) * rad_segments;
            for j in 0..rad_segments {
                let k = (j + 1) % rad_segments;
                indices.extend_from_slice(&[
                    idxa + j,
                    idxa + k,
                    idxb + j,
                    idxb + j,
                    idxa + k,
                    idxb + k,
                ]);
            }
        }
        let last_ring = lon_segments * rad_segments;
        for j in 0..rad_segments {
            let k = (j + 1) % rad_segments;
            indices.extend_from_slice(&[j, bottom, k]);
            indices.extend_from_slice(&[last_ring + j, last_ring + k, top]);
        }

        Self {
            positions,
            indices,
            lon_segments,
            rad_segments,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Memoizes built tube meshes for the life of the process. Geometry for a
/// given key is never rebuilt or mutated; all curves at that tessellation
/// share the same `Rc`.
///
/// Keyed by the `(lon, rad)` tuple. The key is deliberately not packed into a
/// single integer: the original packing (`lon * 128 + rad`) silently aliased
/// once `rad >= 128`.
#[derive(Default)]
pub struct GeometryCache {
    built: FnvHashMap<(u32, u32), Rc<TubeGeometry>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, lon_segments: u32, rad_segments: u32) -> Rc<TubeGeometry> {
        self.built
            .entry((lon_segments, rad_segments))
            .or_insert_with(|| Rc::new(TubeGeometry::build(lon_segments, rad_segments)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.built.len()
    }

    pub fn is_empty(&self) -> bool {
        self.built.is_empty()
    }
}
