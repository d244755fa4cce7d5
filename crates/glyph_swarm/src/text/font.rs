//! Font loading
//!
//! Fonts are read and validated on a background thread. The frame loop polls
//! the [`FontLoader`] between ticks; until it resolves, word generation is
//! unavailable.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use ttf_parser::Face;

use super::{glyph_sampler, Glyph, GlyphSource, GlyphStyle};

/// Location of the bundled font (DejaVu Sans, Bitstream Vera license)
///
/// Anchored at the crate root so binaries find it from any working directory.
pub const DEFAULT_FONT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/fonts/DejaVuSans.ttf");

/// Errors that can occur while loading a font
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to read the font file
    #[error("Failed to read font {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The bytes are not a usable TrueType/OpenType face
    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    /// The loader thread went away without delivering a result
    #[error("Font loader exited without a result")]
    LoaderDisconnected,
}

/// A parsed TrueType/OpenType font
///
/// Holds the raw bytes; the face is re-parsed per glyph, which only touches
/// table headers.
#[derive(Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
}

impl Font {
    /// Validate and wrap font bytes
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let face = Face::parse(&data, 0).map_err(|e| FontError::InvalidFont(e.to_string()))?;
        if face.units_per_em() == 0 {
            return Err(FontError::InvalidFont("units per em is zero".to_string()));
        }
        Ok(Self { data: Arc::new(data) })
    }

    /// Read and validate a font file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(data)?;
        log::info!("Loaded font {} ({} bytes)", path.display(), font.data.len());
        Ok(font)
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, 0).ok()
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").field("bytes", &self.data.len()).finish()
    }
}

impl GlyphSource for Font {
    fn sample(&self, character: char, style: &GlyphStyle) -> Glyph {
        let Some(face) = self.face() else {
            return Glyph::empty(character);
        };
        let Some(glyph_id) = face.glyph_index(character) else {
            log::debug!("No glyph for {character:?}, sampling as empty");
            return Glyph::empty(character);
        };

        let scale = style.size / f32::from(face.units_per_em());
        let mut sink = glyph_sampler::ContourSink::new(scale, style.curve_segments);
        if face.outline_glyph(glyph_id, &mut sink).is_none() {
            return Glyph::empty(character);
        }

        match glyph_sampler::extrude(&sink.finish(), style.depth) {
            Ok(vertices) => Glyph::from_vertices(character, vertices),
            Err(err) => {
                log::warn!("Tessellation of {character:?} failed: {err:?}");
                Glyph::empty(character)
            }
        }
    }
}

/// Availability of the font used for word generation
#[derive(Debug, Clone)]
pub enum FontState<S = Font> {
    /// Load still in flight
    Pending,
    /// Ready to sample glyphs
    Ready(S),
    /// Load failed; generation stays disabled until a font is installed
    Unavailable(String),
}

impl<S> FontState<S> {
    /// The loaded glyph source, if any
    pub fn ready(&self) -> Option<&S> {
        match self {
            Self::Ready(source) => Some(source),
            _ => None,
        }
    }

    /// Whether glyphs can be sampled
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// One-shot background font load
pub struct FontLoader {
    path: PathBuf,
    receiver: Option<Receiver<Result<Font, FontError>>>,
}

impl FontLoader {
    /// Start loading `path` on a background thread
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self, FontError> {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();
        let thread_path = path.clone();

        thread::Builder::new()
            .name("font-loader".to_string())
            .spawn(move || {
                // The receiver may already be gone if the frame loop shut down
                let _ = sender.send(Font::load(&thread_path));
            })
            .map_err(|source| FontError::Io {
                path: path.clone(),
                source,
            })?;

        log::info!("Loading font from {}", path.display());
        Ok(Self {
            path,
            receiver: Some(receiver),
        })
    }

    /// Path being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the load has not resolved yet
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Non-blocking check for the load result
    ///
    /// Returns `Some` exactly once; afterwards the loader is spent.
    pub fn try_poll(&mut self) -> Option<Result<Font, FontError>> {
        let receiver = self.receiver.as_ref()?;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(FontError::LoaderDisconnected),
        };
        self.receiver = None;
        Some(result)
    }
}
