//! Procedural grid mesh generation and GPU buffer uploads.

use crate::types::GRID_SIZE;

/// Generates the tessellated unit grid.
///
/// Emits `size * size` vertices at `(j / (size - 1), i / (size - 1), 0)` in
/// row-major order and, for every interior cell, six `u16` indices forming
/// two triangles with a uniform winding. Pure function of `size`.
pub(crate) fn grid_mesh(size: u32) -> (Vec<f32>, Vec<u16>) {
    assert!(size >= 2, "grid needs at least one cell");
    assert!(
        size * size <= u32::from(u16::MAX) + 1,
        "grid vertex count exceeds the u16 index range"
    );

    let mut positions = Vec::with_capacity((size * size * 3) as usize);
    let mut indices = Vec::with_capacity((6 * (size - 1) * (size - 1)) as usize);
    let edge = (size - 1) as f32;

    for i in 0..size {
        for j in 0..size {
            positions.push(j as f32 / edge);
            positions.push(i as f32 / edge);
            positions.push(0.0);

            if i < size - 1 && j < size - 1 {
                let vertex = (j + i * size) as u16;
                let row = size as u16;
                indices.extend_from_slice(&[
                    vertex,
                    vertex + row,
                    vertex + 1,
                    vertex + 1,
                    vertex + row,
                    vertex + row + 1,
                ]);
            }
        }
    }

    (positions, indices)
}

/// Rounds a byte size up to `wgpu::COPY_BUFFER_ALIGNMENT`.
pub(crate) fn pad_to_copy_alignment(bytes: u64) -> u64 {
    let align = wgpu::COPY_BUFFER_ALIGNMENT;
    (bytes + align - 1) & !(align - 1)
}

/// GPU-resident grid mesh.
pub(crate) struct GridBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub index_count: u32,
}

impl GridBuffers {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let (positions, indices) = grid_mesh(GRID_SIZE);

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&positions);
        let vertex = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid vertex buffer"),
            size: pad_to_copy_alignment(vertex_bytes.len() as u64),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&vertex, 0, vertex_bytes);

        let mut index_bytes: Vec<u8> = bytemuck::cast_slice(&indices).to_vec();
        index_bytes.resize(pad_to_copy_alignment(index_bytes.len() as u64) as usize, 0);
        let index = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid index buffer"),
            size: index_bytes.len() as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&index, 0, &index_bytes);

        tracing::debug!(
            vertices = positions.len() / 3,
            indices = indices.len(),
            "uploaded grid mesh"
        );

        Self {
            vertex,
            index,
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_orientation(positions: &[f32], a: u16, b: u16, c: u16) -> f32 {
        let point = |v: u16| {
            let offset = v as usize * 3;
            (positions[offset], positions[offset + 1])
        };
        let (ax, ay) = point(a);
        let (bx, by) = point(b);
        let (cx, cy) = point(c);
        (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
    }

    #[test]
    fn counts_match_the_closed_form() {
        for size in 2u32..=8 {
            let (positions, indices) = grid_mesh(size);
            assert_eq!(positions.len() as u32, size * size * 3);
            assert_eq!(indices.len() as u32, 6 * (size - 1) * (size - 1));
        }
    }

    #[test]
    fn every_index_addresses_a_vertex() {
        for size in [2u32, 3, 7, 33] {
            let (_, indices) = grid_mesh(size);
            let vertex_count = (size * size) as u16;
            assert!(indices.iter().all(|&index| index < vertex_count));
        }
    }

    #[test]
    fn full_resolution_grid_counts() {
        let (positions, indices) = grid_mesh(160);
        assert_eq!(positions.len() / 3, 25_600);
        assert_eq!(indices.len(), 151_686);
    }

    #[test]
    fn corner_vertices_span_the_unit_square() {
        let (positions, _) = grid_mesh(4);
        assert_eq!(&positions[0..3], &[0.0, 0.0, 0.0]);
        let last = positions.len() - 3;
        assert_eq!(&positions[last..], &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn all_triangles_share_one_winding() {
        let (positions, indices) = grid_mesh(5);
        let reference = triangle_orientation(&positions, indices[0], indices[1], indices[2]);
        assert!(reference != 0.0);

        for triangle in indices.chunks_exact(3) {
            let orientation =
                triangle_orientation(&positions, triangle[0], triangle[1], triangle[2]);
            assert!(
                orientation * reference > 0.0,
                "mixed winding in triangle {triangle:?}"
            );
        }
    }

    #[test]
    fn copy_alignment_rounds_up() {
        assert_eq!(pad_to_copy_alignment(0), 0);
        assert_eq!(pad_to_copy_alignment(1), 4);
        assert_eq!(pad_to_copy_alignment(4), 4);
        assert_eq!(pad_to_copy_alignment(302_328), 302_328);
        assert_eq!(pad_to_copy_alignment(302_330), 302_332);
    }

    #[test]
    #[should_panic(expected = "u16 index range")]
    fn oversized_grid_is_rejected() {
        grid_mesh(300);
    }
}
