use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::surface::FontWeight;

/// Raw font file bytes plus the face index inside a collection.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Whole font file.
    pub bytes: Arc<Vec<u8>>,
    /// Face index for `.ttc` collections, `0` otherwise.
    pub index: u32,
}

/// Regular and bold faces used by [`crate::CpuSurface`].
///
/// Bold falls back to regular when absent. An empty set is allowed so shape-only drawing works
/// without fonts; text calls then fail with a render error.
#[derive(Clone, Debug, Default)]
pub struct FontSet {
    regular: Option<FontFace>,
    bold: Option<FontFace>,
}

impl FontSet {
    /// Build from already loaded faces.
    pub fn new(regular: FontFace, bold: Option<FontFace>) -> Self {
        Self {
            regular: Some(regular),
            bold,
        }
    }

    /// Load explicit font files.
    pub fn from_files(regular: &Path, bold: Option<&Path>) -> PosterResult<Self> {
        let read = |p: &Path| -> PosterResult<FontFace> {
            let bytes = std::fs::read(p).map_err(|e| {
                PosterError::validation(format!("read font '{}': {e}", p.display()))
            })?;
            Ok(FontFace {
                bytes: Arc::new(bytes),
                index: 0,
            })
        };
        Ok(Self::new(read(regular)?, bold.map(read).transpose()?))
    }

    /// Find sans-serif regular and bold faces in `font_dir` (if given) and system fonts.
    pub fn discover(font_dir: Option<&Path>) -> PosterResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        db.load_system_fonts();

        let regular = query_face(&db, usvg::fontdb::Weight::NORMAL)
            .ok_or_else(|| PosterError::validation("no sans-serif font face found"))?;
        let bold = query_face(&db, usvg::fontdb::Weight::BOLD);
        tracing::debug!(
            faces = db.len(),
            has_bold = bold.is_some(),
            "discovered poster fonts"
        );
        Ok(Self::new(regular, bold))
    }

    /// Face for `weight`, falling back to regular.
    pub fn face(&self, weight: FontWeight) -> Option<&FontFace> {
        match weight {
            FontWeight::Regular => self.regular.as_ref(),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    /// `true` when no faces are loaded.
    pub fn is_empty(&self) -> bool {
        self.regular.is_none()
    }
}

fn query_face(db: &usvg::fontdb::Database, weight: usvg::fontdb::Weight) -> Option<FontFace> {
    let families = [
        usvg::fontdb::Family::Name("Inter"),
        usvg::fontdb::Family::SansSerif,
        usvg::fontdb::Family::Name("DejaVu Sans"),
        usvg::fontdb::Family::Name("Liberation Sans"),
    ];
    let query = usvg::fontdb::Query {
        families: &families,
        weight,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
    })
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}
