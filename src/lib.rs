//! Image color-palette engine.
//!
//! Extracts the dominant colors of an image and derives everything the
//! palette tool offers from them: names and mood, hue ordering, harmonies
//! and mixes, a role-based theme, brand look-alikes, rendered strips,
//! posters, gradients and wallpapers, and a tone per color.
//!
//! The crate builds both as a WebAssembly module (see the `#[wasm_bindgen]`
//! exports in [`bindings`]) and as a native library used by the
//! `pixelpalette` command line tool.

pub mod analysis;
pub mod bindings;
pub mod brand;
pub mod cache;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod harmony;
pub mod render;
pub mod session;
pub mod store;
pub mod theme;
pub mod tone;

pub use analysis::{Mood, PaletteMeta, StoryMeta};
pub use brand::BrandMatch;
pub use color::{Palette, Rgb};
pub use config::Settings;
pub use error::{PaletteError, Result};
pub use extract::ExtractOptions;
pub use session::Session;
pub use store::PaletteStore;
pub use theme::Theme;
pub use tone::Tone;
