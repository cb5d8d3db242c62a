//! Minimal OBJ parser supporting positions, normals, texture coordinates and
//! triangle/quad faces.
//!
//! Loading is fail-fast: the first malformed record aborts the whole load and
//! no partial [`Model`] is returned.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
    str::SplitWhitespace,
};

use corelib::{GrowableBuffer, Vec2, Vec3, vec2, vec3};

use crate::{
    error::LoadError,
    model::{Face, FaceCorner, Model},
};

/// Longest accepted line in bytes, line terminator excluded.
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

const INITIAL_CAPACITY: usize = 128;

/// Load a model from a file path with default settings.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model, LoadError> {
    ModelLoader::new().load(path)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_model_from_str(contents: &str) -> Result<Model, LoadError> {
    ModelLoader::new().load_from_reader(io::Cursor::new(contents))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelLoader {
    max_line_len: usize,
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoader {
    pub const fn new() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }

    pub const fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    #[inline]
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Load an OBJ model from a file path.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Model, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Load an OBJ model from a [`BufRead`] implementation.
    pub fn load_from_reader<R: BufRead>(&self, mut reader: R) -> Result<Model, LoadError> {
        let mut builder = ModelBuilder::new()?;
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            line_number += 1;
            if !read_line(&mut reader, &mut buf, self.max_line_len, line_number)? {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            builder.parse_line(&line, line_number)?;
        }

        Ok(builder.finish())
    }
}

/// Reads one line into `buf` without its terminator. Returns `false` at EOF.
fn read_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
    line_number: usize,
) -> Result<bool, LoadError> {
    buf.clear();
    // +2 leaves room for "\r\n" on a line of exactly `limit` bytes
    let read = reader
        .by_ref()
        .take((limit as u64).saturating_add(2))
        .read_until(b'\n', buf)
        .map_err(|source| LoadError::Read {
            line_number,
            source,
        })?;
    if read == 0 {
        return Ok(false);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if buf.len() > limit {
        return Err(LoadError::LineTooLong { line_number, limit });
    }
    Ok(true)
}

struct ModelBuilder {
    positions: GrowableBuffer<Vec3>,
    normals: GrowableBuffer<Vec3>,
    texcoords: GrowableBuffer<Vec2>,
    faces: GrowableBuffer<Face>,
}

impl ModelBuilder {
    fn new() -> Result<Self, LoadError> {
        Ok(Self {
            positions: GrowableBuffer::with_capacity(INITIAL_CAPACITY)?,
            normals: GrowableBuffer::with_capacity(INITIAL_CAPACITY)?,
            texcoords: GrowableBuffer::with_capacity(INITIAL_CAPACITY)?,
            faces: GrowableBuffer::with_capacity(INITIAL_CAPACITY)?,
        })
    }

    fn parse_line(&mut self, line: &str, line_number: usize) -> Result<(), LoadError> {
        let content = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let mut parts = content.split_whitespace();
        let Some(tag) = parts.next() else {
            return Ok(());
        };

        let malformed = || LoadError::MalformedRecord {
            line_number,
            raw_text: line.to_owned(),
        };

        match tag {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&mut parts).ok_or_else(malformed)?;
                self.positions.push(vec3(x, y, z))?;
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&mut parts).ok_or_else(malformed)?;
                self.texcoords.push(vec2(u, v))?;
            }
            "vn" => {
                let [nx, ny, nz] = parse_floats::<3>(&mut parts).ok_or_else(malformed)?;
                self.normals.push(vec3(nx, ny, nz))?;
            }
            "f" => {
                let count = parts.clone().count();
                if !(3..=4).contains(&count) {
                    return Err(LoadError::UnsupportedFaceArity { line_number, count });
                }
                let mut corners = [FaceCorner::default(); 4];
                for (slot, token) in corners.iter_mut().zip(parts) {
                    *slot = parse_corner(token).ok_or_else(malformed)?;
                }
                let face = if count == 3 {
                    Face::Triangle([corners[0], corners[1], corners[2]])
                } else {
                    Face::Quad(corners)
                };
                self.faces.push(face)?;
            }
            _ => {
                // Ignore other directives (o/g/s/usemtl/mtllib etc.)
            }
        }
        Ok(())
    }

    fn finish(self) -> Model {
        Model::from_parts(self.positions, self.normals, self.texcoords, self.faces)
    }
}

/// Parses the next `N` fields as floats. Extra trailing fields are ignored.
fn parse_floats<const N: usize>(parts: &mut SplitWhitespace<'_>) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        *slot = parts.next()?.parse().ok()?;
    }
    Some(out)
}

/// `p`, `p/t`, `p//n` or `p/t/n`; a missing texture or normal index is 0.
fn parse_corner(token: &str) -> Option<FaceCorner> {
    let mut fields = token.split('/');
    let position = fields.next().filter(|f| !f.is_empty())?.parse().ok()?;
    let texture = parse_optional_index(fields.next())?;
    let normal = parse_optional_index(fields.next())?;
    if fields.next().is_some() {
        return None;
    }
    Some(FaceCorner::new(position, texture, normal))
}

fn parse_optional_index(field: Option<&str>) -> Option<u32> {
    match field {
        None | Some("") => Some(0),
        Some(value) => value.parse().ok(),
    }
}
