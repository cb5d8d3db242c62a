//! Core shared types and errors (renderer-agnostic).

pub use glam::{Vec2, Vec3, vec2, vec3};

pub mod buffer;

pub use buffer::{BufferError, BufferResult, GrowableBuffer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_vectors_feed_glam_math() {
        let mut buf = GrowableBuffer::new();
        buf.push(vec3(1.0, 0.0, 0.0)).unwrap();
        buf.push(vec3(0.0, 2.0, 0.0)).unwrap();
        buf.push(vec3(0.0, 0.0, 3.0)).unwrap();
        let centroid = buf.iter().copied().sum::<Vec3>() / buf.size() as f32;
        assert!(centroid.abs_diff_eq(vec3(1.0 / 3.0, 2.0 / 3.0, 1.0), 1e-6));
        assert_eq!(vec2(0.5, 1.0), Vec2::new(0.5, 1.0));
    }
}
