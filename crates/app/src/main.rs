//! Entry point for meshload.
//! Loads OBJ models and logs what was parsed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{DEFAULT_MAX_LINE_LEN, Model, ModelLoader};

const DEFAULT_MODEL: &str = "assets/models/Cube.obj";
const BUILD_ENV: &str = "MESHLOAD_BUILD";

/// Application context, built once in `main` and passed down.
#[derive(Clone, Debug, PartialEq)]
struct AppConfig {
    models: Vec<PathBuf>,
    debug: bool,
    build_mesh: bool,
    max_line_len: usize,
}

impl AppConfig {
    // Accept: [PATH...] --model=PATH --debug --mesh --max-line=N
    fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self {
            models: Vec::new(),
            debug: false,
            build_mesh: false,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        };

        for arg in args {
            let arg = arg.as_ref();
            if arg == "--debug" {
                config.debug = true;
            } else if arg == "--mesh" {
                config.build_mesh = true;
            } else if let Some(v) = arg.strip_prefix("--model=") {
                config.models.push(PathBuf::from(v));
            } else if let Some(v) = arg.strip_prefix("--max-line=") {
                match v.parse::<usize>() {
                    Ok(n) if n > 0 => config.max_line_len = n,
                    _ => eprintln!("[warn] Invalid --max-line '{}', keeping {}.", v, config.max_line_len),
                }
            } else if arg.starts_with("--") {
                eprintln!("[warn] Unknown flag '{}', ignored.", arg);
            } else {
                config.models.push(PathBuf::from(arg));
            }
        }

        if config.models.is_empty() {
            config.models.push(PathBuf::from(DEFAULT_MODEL));
        }
        config
    }
}

fn is_debug_build(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("debug"))
}

fn main() -> Result<()> {
    let mut config = AppConfig::from_args(std::env::args().skip(1));
    config.debug |= is_debug_build(std::env::var(BUILD_ENV).ok().as_deref());

    let default_filter = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::debug!("Debug mode set, config={:?}", config);

    let loader = ModelLoader::new().with_max_line_len(config.max_line_len);
    let mut failed = 0usize;
    // Each path gets its own load; nothing is shared between models.
    for path in &config.models {
        if let Err(err) = load_and_report(&loader, path, config.build_mesh) {
            log::error!("{err:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} model(s) failed", failed, config.models.len());
    }
    log::info!("Loaded {} model(s).", config.models.len());
    Ok(())
}

fn load_and_report(loader: &ModelLoader, path: &Path, build_mesh: bool) -> Result<()> {
    log::info!("Loading model from {}", path.display());
    let model = loader
        .load(path)
        .with_context(|| format!("Failed to load model {}", path.display()))?;
    log_summary(path, &model);

    if build_mesh {
        let mesh = model
            .to_mesh_data()
            .with_context(|| format!("Failed to build mesh for {}", path.display()))?;
        log::info!(
            "Mesh ready: {} vertices, {} indices ({} + {} bytes)",
            mesh.vertices.len(),
            mesh.indices.len(),
            mesh.vertex_bytes().len(),
            mesh.index_bytes().len()
        );
    }
    Ok(())
}

fn log_summary(path: &Path, model: &Model) {
    log::info!(
        "Loaded {}: {} positions, {} normals, {} texcoords, {} faces ({} triangles)",
        path.display(),
        model.positions().size(),
        model.normals().size(),
        model.texcoords().size(),
        model.faces().size(),
        model.triangle_count()
    );
    if model.is_empty() {
        log::warn!("{} contains no geometry", path.display());
    }
    for (i, face) in model.faces().iter().enumerate() {
        log::debug!("face {}: {:?}", i, face.corners());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_cube_model() {
        let config = AppConfig::from_args(Vec::<String>::new());
        assert_eq!(config.models, vec![PathBuf::from(DEFAULT_MODEL)]);
        assert!(!config.debug);
        assert!(!config.build_mesh);
        assert_eq!(config.max_line_len, DEFAULT_MAX_LINE_LEN);
    }

    #[test]
    fn parses_flags_and_paths() {
        let config = AppConfig::from_args([
            "a.obj",
            "--model=b.obj",
            "--debug",
            "--mesh",
            "--max-line=256",
            "--unknown",
        ]);
        assert_eq!(
            config.models,
            vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")]
        );
        assert!(config.debug);
        assert!(config.build_mesh);
        assert_eq!(config.max_line_len, 256);
    }

    #[test]
    fn invalid_max_line_keeps_default() {
        let config = AppConfig::from_args(["--max-line=0", "--max-line=lots"]);
        assert_eq!(config.max_line_len, DEFAULT_MAX_LINE_LEN);
    }

    #[test]
    fn largest_max_line_is_accepted() {
        let config = AppConfig::from_args([format!("--max-line={}", usize::MAX)]);
        assert_eq!(config.max_line_len, usize::MAX);
    }

    #[test]
    fn build_type_switch() {
        assert!(is_debug_build(Some("Debug")));
        assert!(is_debug_build(Some("DEBUG")));
        assert!(!is_debug_build(Some("Release")));
        assert!(!is_debug_build(None));
    }
}
