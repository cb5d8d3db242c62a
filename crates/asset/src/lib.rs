//! Asset loading/parsers.
//! OBJ subset (v/vt/vn/f) into a [`model::Model`], plus conversion to
//! render-ready [`mesh::MeshData`].

pub mod error;
pub mod mesh;
pub mod model;
pub mod obj;

pub use error::{Attribute, LoadError, MeshError};
pub use mesh::{MeshData, MeshVertex};
pub use model::{Face, FaceCorner, Model};
pub use obj::{DEFAULT_MAX_LINE_LEN, ModelLoader, load_model, load_model_from_str};
