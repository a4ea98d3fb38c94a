//! First-page PDF rasterization.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::error::{Error, Result};
use crate::report::Report;

/// Upscaling factor applied when rasterizing. A 1:1 render is too soft to
/// read once embedded at the report's display width.
const ZOOM: f32 = 2.0;

pub fn append(path: &Path, report: &mut Report) {
    match render_first_page(path) {
        Ok(page) => report.add_picture(page.png, page.width, page.height),
        Err(err) => log::warn!("failed to rasterize {}: {err}", path.display()),
    }
}

pub(crate) struct RenderedPage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Rasterize only the first page at [`ZOOM`]x into an in-memory PNG.
///
/// Corrupt and zero-page documents surface as [`Error::Render`]; no
/// intermediate file ever touches disk.
pub(crate) fn render_first_page(path: &Path) -> Result<RenderedPage> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Render(format!("pdfium library unavailable: {e}")))?;
    let pdfium = Pdfium::new(bindings);

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| Error::Render(format!("cannot open PDF: {e}")))?;
    let page = document
        .pages()
        .get(0)
        .map_err(|e| Error::Render(format!("cannot read first page: {e}")))?;

    let width = (page.width().value * ZOOM).round() as i32;
    let height = (page.height().value * ZOOM).round() as i32;
    let config = PdfRenderConfig::new()
        .set_target_width(width)
        .set_target_height(height);
    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| Error::Render(format!("rasterization failed: {e}")))?;

    let rendered = bitmap.as_image();
    let mut png = Vec::new();
    rendered.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(RenderedPage {
        png,
        width: rendered.width(),
        height: rendered.height(),
    })
}
