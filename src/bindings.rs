//! JavaScript surface. Palettes cross the boundary as JSON text
//! (`[[r,g,b], ...]`), rendered images as PNG bytes.

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::cache::CacheManifest;
use crate::color::Palette;
use crate::error::PaletteError;
use crate::extract::ExtractOptions;
use crate::store::{STORAGE_KEY, decode_palette};
use crate::tone::Tone;
use crate::{analysis, brand, color, export, extract, harmony, theme};

fn js_err(err: PaletteError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse(palette_json: &str) -> Result<Palette, JsValue> {
    decode_palette(palette_json).map_err(js_err)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err(e.into()))
}

fn palette_object(palette: &Palette) -> Result<Object, JsValue> {
    let triples = Array::new();
    let hexes = Array::new();
    for c in palette {
        let triple = Array::new();
        for v in c.0 {
            triple.push(&JsValue::from(v));
        }
        triples.push(&triple);
        hexes.push(&JsValue::from_str(&c.to_hex()));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &triples)?;
    Reflect::set(&result, &JsValue::from_str("hex"), &hexes)?;
    Ok(result)
}

fn options(n_colors: usize) -> ExtractOptions {
    ExtractOptions { k: n_colors, ..ExtractOptions::default() }
}

/// Extract `n_colors` dominant colors from an encoded image.
///
/// Returns `{ palette: [[r,g,b], ...], hex: ["#RRGGBB", ...] }`.
#[wasm_bindgen]
pub fn extract_palette(input: Vec<u8>, n_colors: usize) -> Result<Object, JsValue> {
    let palette = extract::extract_from_image(&input, &options(n_colors)).map_err(js_err)?;
    palette_object(&palette)
}

/// Extract from canvas `ImageData` bytes.
#[wasm_bindgen]
pub fn extract_palette_rgba(width: u32, height: u32, rgba: Vec<u8>, n_colors: usize) -> Result<Object, JsValue> {
    let palette = extract::extract_palette(width, height, &rgba, &options(n_colors)).map_err(js_err)?;
    palette_object(&palette)
}

#[wasm_bindgen]
pub fn smart_sort(palette_json: &str) -> Result<String, JsValue> {
    to_json(&analysis::smart_sort(&parse(palette_json)?))
}

#[wasm_bindgen]
pub fn color_names(palette_json: &str) -> Result<String, JsValue> {
    to_json(&analysis::color_names(&parse(palette_json)?))
}

#[wasm_bindgen]
pub fn palette_meta(palette_json: &str) -> Result<String, JsValue> {
    to_json(&analysis::palette_meta(&parse(palette_json)?))
}

#[wasm_bindgen]
pub fn story_meta(palette_json: &str) -> Result<String, JsValue> {
    to_json(&analysis::story_meta(&parse(palette_json)?))
}

#[wasm_bindgen]
pub fn harmony_from_hex(seed: &str, n: usize) -> Result<String, JsValue> {
    to_json(&harmony::harmony_from_hex(seed, n).map_err(js_err)?)
}

#[wasm_bindgen]
pub fn mix_hex(a: &str, b: &str, steps: usize) -> Result<String, JsValue> {
    to_json(&harmony::mix_hex(a, b, steps).map_err(js_err)?)
}

/// `{ "variables": { role: "#RRGGBB", ... } }`
#[wasm_bindgen]
pub fn build_theme(palette_json: &str) -> Result<String, JsValue> {
    to_json(&theme::build_theme(&parse(palette_json)?))
}

#[wasm_bindgen]
pub fn theme_css(palette_json: &str) -> Result<String, JsValue> {
    Ok(theme::build_theme(&parse(palette_json)?).to_css())
}

#[wasm_bindgen]
pub fn theme_json(palette_json: &str) -> Result<String, JsValue> {
    theme::build_theme(&parse(palette_json)?).to_json().map_err(js_err)
}

#[wasm_bindgen]
pub fn brand_matches(palette_json: &str) -> Result<String, JsValue> {
    to_json(&brand::brand_matches(&parse(palette_json)?))
}

/// The clipboard text for a palette: one hex code per line.
#[wasm_bindgen]
pub fn hex_text(palette_json: &str) -> Result<String, JsValue> {
    Ok(color::hex_list(&parse(palette_json)?))
}

#[wasm_bindgen]
pub fn render_palette_png(palette_json: &str, width: u32, height: u32) -> Result<Uint8Array, JsValue> {
    let png = export::strip_png(&parse(palette_json)?, width, height).map_err(js_err)?;
    Ok(Uint8Array::from(png.as_slice()))
}

#[wasm_bindgen]
pub fn render_story_png(palette_json: &str) -> Result<Uint8Array, JsValue> {
    let png = export::poster_png(&parse(palette_json)?).map_err(js_err)?;
    Ok(Uint8Array::from(png.as_slice()))
}

#[wasm_bindgen]
pub fn render_gradient_png(palette_json: &str, width: u32, height: u32) -> Result<Uint8Array, JsValue> {
    let png = export::gradient_png(&parse(palette_json)?, width, height).map_err(js_err)?;
    Ok(Uint8Array::from(png.as_slice()))
}

#[wasm_bindgen]
pub fn render_wallpaper_png(palette_json: &str, width: u32, height: u32) -> Result<Uint8Array, JsValue> {
    let png = export::wallpaper_png(&parse(palette_json)?, width, height).map_err(js_err)?;
    Ok(Uint8Array::from(png.as_slice()))
}

/// Oscillator parameters for a swatch: `{ frequency, duration, gain, type }`.
#[wasm_bindgen]
pub fn tone_from_hex(hex: &str, duration: f32) -> Result<Object, JsValue> {
    let tone = Tone::from_hex(hex, duration).map_err(js_err)?;
    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("frequency"), &JsValue::from(tone.frequency))?;
    Reflect::set(&result, &JsValue::from_str("duration"), &JsValue::from(tone.duration))?;
    Reflect::set(&result, &JsValue::from_str("gain"), &JsValue::from(tone.gain))?;
    Reflect::set(&result, &JsValue::from_str("type"), &JsValue::from_str("sine"))?;
    Ok(result)
}

#[wasm_bindgen]
pub fn storage_key() -> String {
    STORAGE_KEY.to_string()
}

/// Cache name and asset list for the service worker's install step.
#[wasm_bindgen]
pub fn cache_manifest() -> Result<String, JsValue> {
    to_json(&CacheManifest::default())
}

/// Names from `caches.keys()` that the activate step should delete.
#[wasm_bindgen]
pub fn stale_caches(keys: Array) -> Array {
    let names: Vec<String> = keys.iter().filter_map(|k| k.as_string()).collect();
    CacheManifest::default()
        .stale_caches(names.iter().map(String::as_str))
        .into_iter()
        .map(|name| JsValue::from_str(&name))
        .collect()
}
