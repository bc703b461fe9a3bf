//! Hosts that receive the dial scene after every render pass.

use std::path::{Path, PathBuf};

use crate::render::Scene;

/// Where a dial's scene ends up. Called once per render pass.
pub trait Container {
    fn present(&mut self, scene: &Scene);
}

impl<F: FnMut(&Scene)> Container for F {
    fn present(&mut self, scene: &Scene) {
        self(scene)
    }
}

/// Keeps the most recent serialized SVG in memory.
#[derive(Debug, Default)]
pub struct SvgBuffer {
    latest: Option<String>,
    presents: usize,
}

impl SvgBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully serialized document
    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    pub fn presents(&self) -> usize {
        self.presents
    }
}

impl Container for SvgBuffer {
    fn present(&mut self, scene: &Scene) {
        self.presents += 1;
        match scene.to_svg_string() {
            Ok(svg) => self.latest = Some(svg),
            Err(e) => crate::log::warn!("keeping previous dial svg: {}", e),
        }
    }
}

/// Rewrites an SVG file on every render pass.
///
/// Each pass writes a sibling `.tmp` file and renames it over the target, so
/// readers never see a half-written document. Failures are logged and
/// otherwise ignored; the file keeps its previous content.
#[derive(Debug, Clone)]
pub struct SvgFile {
    path: PathBuf,
}

impl SvgFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn replace(&self, svg: &str) -> std::io::Result<()> {
        let temp = self.temp_path();
        std::fs::write(&temp, svg)?;
        std::fs::rename(&temp, &self.path).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp);
        })
    }
}

impl Container for SvgFile {
    fn present(&mut self, scene: &Scene) {
        let svg = match scene.to_svg_string() {
            Ok(svg) => svg,
            Err(e) => {
                crate::log::error!("failed to serialize dial: {}", e);
                return;
            }
        };
        if let Err(e) = self.replace(&svg) {
            crate::log::error!("failed to write {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DialOptions, create_dial};

    #[test]
    fn svg_file_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dial.svg");
        std::fs::write(&path, "stale").unwrap();

        let mut dial = create_dial(SvgFile::new(&path), DialOptions::new()).unwrap();
        dial.set_target_temperature(72.0);

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"), "{svg}");
        assert!(svg.contains("dial__ticks"));

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("dial.svg")]);
    }

    #[test]
    fn unwritable_target_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dial.svg");
        let mut dial = create_dial(SvgFile::new(&path), DialOptions::new()).unwrap();
        dial.set_target_temperature(68.0);
        assert!(!path.exists());
        assert_eq!(dial.target_temperature(), 68.0);
    }
}
